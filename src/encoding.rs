//! Compression and byte encoding of polynomials.
//!
//! `d`-bit values are packed as a little-endian bit stream: value `i` occupies
//! stream bits `i*d .. (i+1)*d`, least significant bit first.

use subtle::{Choice, ConstantTimeLess};

use crate::error::{KyberError, Result};
use crate::field::kyber::{KyberFq, KYBER_Q};
use crate::field::Field;
use crate::params::{poly_compressed_bytes, KYBER_N, MSG_BYTES, POLYBYTES};
use crate::poly::kyber::KyberPoly;

/// `round(x * 2^D / q) mod 2^D` for `x` in `[0, q)`, with a multiply-shift in
/// place of the division. Exact for `D <= 10`.
#[inline(always)]
pub fn compress_d<const D: usize>(x: i16) -> u16 {
    debug_assert!(D <= 10);
    debug_assert!((0..KYBER_Q).contains(&x));
    let t = ((x as u64) << D) + (KYBER_Q as u64 + 1) / 2;
    (((t * 1_290_167) >> 32) & ((1 << D) - 1)) as u16
}

/// `round(y * q / 2^D)`
#[inline(always)]
pub fn decompress_d<const D: usize>(y: u16) -> i16 {
    debug_assert!((y as u32) < (1 << D));
    ((y as u32 * KYBER_Q as u32 + (1 << (D - 1))) >> D) as i16
}

fn pack<const D: usize>(values: impl Iterator<Item = u16>, out: &mut [u8]) {
    debug_assert_eq!(out.len(), poly_compressed_bytes(D));
    let mut out = out.iter_mut();
    let mut acc = 0u32;
    let mut bits = 0;
    for value in values {
        acc |= (value as u32) << bits;
        bits += D;
        while bits >= 8 {
            if let Some(byte) = out.next() {
                *byte = acc as u8;
            }
            acc >>= 8;
            bits -= 8;
        }
    }
    debug_assert_eq!(bits, 0);
}

fn unpack<const D: usize>(bytes: &[u8], mut sink: impl FnMut(usize, u16)) {
    debug_assert_eq!(bytes.len(), poly_compressed_bytes(D));
    let mask = (1u32 << D) - 1;
    let mut acc = 0u32;
    let mut bits = 0;
    let mut i = 0;
    for &byte in bytes {
        acc |= (byte as u32) << bits;
        bits += 8;
        while bits >= D {
            sink(i, (acc & mask) as u16);
            i += 1;
            acc >>= D;
            bits -= D;
        }
    }
    debug_assert_eq!(i, KYBER_N);
}

impl KyberPoly {
    fn canonical_scalars(&self) -> impl Iterator<Item = i16> + '_ {
        self.as_ref().iter().flat_map(|f| f.freeze().0)
    }

    /// 12-bit encoding of the canonical representatives of all coefficients
    pub fn to_bytes(&self, bytes: &mut [u8; POLYBYTES]) {
        pack::<12>(self.canonical_scalars().map(|x| x as u16), bytes);
    }

    /// Decodes a 12-bit encoding. Fails on any length other than `POLYBYTES`
    /// and on coefficients that are not reduced modulo q.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != POLYBYTES {
            return Err(KyberError::malformed("polynomial", "wrong length"));
        }
        let mut poly = Self::default();
        let mut valid = Choice::from(1);
        unpack::<12>(bytes, |i, x| {
            valid &= x.ct_lt(&(KYBER_Q as u16));
            poly[i / 2].0[i % 2] = x as i16;
        });
        if bool::from(valid) {
            Ok(poly)
        } else {
            Err(KyberError::malformed(
                "polynomial",
                "coefficient not reduced modulo q",
            ))
        }
    }

    /// Compresses every coefficient to `D` bits and packs them into `bytes`
    pub fn compress<const D: usize>(&self, bytes: &mut [u8]) {
        pack::<D>(self.canonical_scalars().map(compress_d::<D>), bytes);
    }

    pub fn decompress<const D: usize>(&mut self, bytes: &[u8]) {
        unpack::<D>(bytes, |i, y| self[i / 2].0[i % 2] = decompress_d::<D>(y));
    }

    /// Maps message bit `i` to `round(q/2) * m_i`, branch-free
    pub fn from_message(msg: &[u8; MSG_BYTES]) -> Self {
        let mut poly = Self::default();
        for (f, byte) in poly.as_mut().chunks_exact_mut(4).zip(msg.iter()) {
            for (j, c) in f.iter_mut().enumerate() {
                *c = KyberFq([0, 1].map(|k| {
                    let mask = -(((*byte >> (2 * j + k)) & 1) as i16);
                    mask & ((KYBER_Q + 1) / 2)
                }));
            }
        }
        poly
    }

    /// Rounds every coefficient to one bit: 1 iff it is closer to q/2 than to 0
    pub fn to_message(&self, msg: &mut [u8; MSG_BYTES]) {
        pack::<1>(self.canonical_scalars().map(compress_d::<1>), msg);
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::poly::Polynomial;

    fn round_div(num: u64, den: u64) -> u64 {
        (2 * num + den) / (2 * den)
    }

    fn check_compress<const D: usize>() {
        for x in 0..KYBER_Q {
            let expected = round_div((x as u64) << D, KYBER_Q as u64) % (1 << D);
            assert_eq!(compress_d::<D>(x) as u64, expected, "D = {}, x = {}", D, x);

            // |x - decompress(compress(x))| mod q is at most round(q / 2^(D+1))
            let y = decompress_d::<D>(compress_d::<D>(x)) as i32;
            let diff = (x as i32 - y).rem_euclid(KYBER_Q as i32);
            let err = diff.min(KYBER_Q as i32 - diff);
            assert!(
                err as u64 <= round_div(KYBER_Q as u64, 1 << (D + 1)),
                "D = {}, x = {}, err = {}",
                D,
                x,
                err
            );
        }
        for y in 0..(1u16 << D) {
            let x = decompress_d::<D>(y);
            assert!((0..KYBER_Q).contains(&x));
            assert_eq!(compress_d::<D>(x), y);
        }
    }

    #[test]
    fn compress_rounding_exhaustive() {
        check_compress::<1>();
        check_compress::<4>();
        check_compress::<10>();
    }

    #[test]
    fn bit_order_4() {
        let mut coeffs = [0i16; KYBER_N];
        coeffs[0] = decompress_d::<4>(0x1);
        coeffs[1] = decompress_d::<4>(0xA);
        coeffs[2] = decompress_d::<4>(0xF);
        let poly = KyberPoly::from_array(&coeffs);
        let mut bytes = [0u8; poly_compressed_bytes(4)];
        poly.compress::<4>(&mut bytes);
        assert_eq!(&bytes[..3], &[0xA1, 0x0F, 0x00]);
    }

    #[test]
    fn bit_order_10() {
        let mut coeffs = [0i16; KYBER_N];
        coeffs[0] = decompress_d::<10>(0x3FF);
        coeffs[1] = decompress_d::<10>(0x001);
        coeffs[3] = decompress_d::<10>(0x200);
        let poly = KyberPoly::from_array(&coeffs);
        let mut bytes = [0u8; poly_compressed_bytes(10)];
        poly.compress::<10>(&mut bytes);
        // stream bits 0 through 10 and bit 39 are set
        assert_eq!(&bytes[..5], &[0xFF, 0x07, 0x00, 0x00, 0x80]);

        let mut decoded = KyberPoly::default();
        decoded.decompress::<10>(&bytes);
        assert_eq!(decoded.into_array(), coeffs);
    }

    #[test]
    fn bit_order_12() {
        let mut coeffs = [0i16; KYBER_N];
        coeffs[0] = 0x123;
        coeffs[1] = 0xCDE - 0x100; // 0xBDE < q
        let mut bytes = [0u8; POLYBYTES];
        KyberPoly::from_array(&coeffs).to_bytes(&mut bytes);
        assert_eq!(&bytes[..3], &[0x23, 0xE1, 0xBD]);
    }

    #[test]
    fn bytes_are_canonical() {
        let mut rng = rand::thread_rng();
        let poly = KyberPoly::new_random(&mut rng);
        let mut bytes = [0u8; POLYBYTES];
        poly.to_bytes(&mut bytes);

        let decoded = KyberPoly::from_bytes(&bytes).expect("canonical encoding");
        let mut frozen = poly;
        frozen.freeze();
        assert_eq!(decoded, frozen);
    }

    #[test]
    fn from_bytes_rejects_bad_input() {
        let bytes = [0u8; POLYBYTES];
        assert!(KyberPoly::from_bytes(&bytes[..POLYBYTES - 1]).is_err());
        assert!(KyberPoly::from_bytes(&[0u8; POLYBYTES + 1]).is_err());

        // q itself in the last coefficient
        let mut bytes = [0u8; POLYBYTES];
        bytes[POLYBYTES - 2] = ((KYBER_Q & 0xF) << 4) as u8;
        bytes[POLYBYTES - 1] = (KYBER_Q >> 4) as u8;
        assert_eq!(
            KyberPoly::from_bytes(&bytes),
            Err(KyberError::malformed(
                "polynomial",
                "coefficient not reduced modulo q"
            ))
        );
        // q - 1 is fine
        bytes[POLYBYTES - 2] = (((KYBER_Q - 1) & 0xF) << 4) as u8;
        assert!(KyberPoly::from_bytes(&bytes).is_ok());
    }

    #[test]
    fn message_encoding() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut msg = [0u8; MSG_BYTES];
            rng.fill(&mut msg);
            let poly = KyberPoly::from_message(&msg);
            for (i, c) in poly.into_array().iter().enumerate() {
                let bit = (msg[i / 8] >> (i % 8)) & 1;
                assert_eq!(*c, bit as i16 * 1665);
            }

            // noise below q/4 does not flip any bit
            let mut noisy = poly;
            let noise = KyberPoly::from_array(&array_init::array_init(|_| {
                rng.gen_range(-(KYBER_Q / 4 - 1)..KYBER_Q / 4)
            }));
            noisy += &noise;
            noisy.reduce();

            let mut decoded = [0u8; MSG_BYTES];
            noisy.to_message(&mut decoded);
            assert_eq!(decoded, msg);
        }
    }
}
