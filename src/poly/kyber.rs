use rand::{CryptoRng, Rng, RngCore};
use sha3::digest::XofReader;
use zeroize::Zeroizing;

use crate::field::kyber::{fqmul, KyberFq, KYBER_Q, MONT};
use crate::field::Field;
use crate::params::{KYBER_ETA2, KYBER_N, KYBER_SYMBYTES};
use crate::symmetric::{CrystalsPrf, Prf, XOF_BLOCK_BYTES};

use super::{Poly, Polynomial};

const ROOT_OF_UNITY: i16 = 17; // 2Nth (256-th) root of 1 mod Q

pub type KyberPoly = Poly<KyberFq, { KYBER_N / 2 }>;

/// Bytes of PRF output consumed by one centered binomial sample with eta = 2
pub const NOISE_BYTES: usize = KYBER_ETA2 * KYBER_N / 4;

// ZETAS[k - 1] = MONT * ROOT_OF_UNITY^brv7(k) for k in 1..128
const ZETAS: [i16; KyberPoly::N - 1] = {
    let mut zetas = [0i16; KyberPoly::N - 1];
    let mut i = 1;
    let mut omega = MONT;
    const ROOT_OF_UNITY_MONT: i16 = (MONT * ROOT_OF_UNITY) % KYBER_Q;
    while i < KyberPoly::N {
        let br = (i as u8).reverse_bits() as usize >> 1;
        omega = fqmul(omega, ROOT_OF_UNITY_MONT);
        zetas[br - 1] = omega;
        i += 1;
    }
    zetas
};

impl Polynomial<{ KYBER_N / 2 }> for KyberPoly {
    type F = KyberFq;

    const INV_NTT_SCALE: <Self::F as Field>::E = 1441; // MONT^2 / 128

    #[inline(always)]
    fn zetas(k: usize) -> <Self::F as Field>::E {
        ZETAS[k]
    }

    fn pointwise(&self, other: &Self, result: &mut Self) {
        for (((tr, ta), tb), zeta) in result
            .as_mut()
            .chunks_exact_mut(2)
            .zip(self.as_ref().chunks_exact(2))
            .zip(other.as_ref().chunks_exact(2))
            .zip(ZETAS[63..].iter())
        {
            tr[0] = ta[0].basemul(tb[0], *zeta);
            tr[1] = ta[1].basemul(tb[1], -*zeta);
        }
    }

    fn pointwise_acc(&self, other: &Self, result: &mut Self) {
        for (((tr, ta), tb), zeta) in result
            .as_mut()
            .chunks_exact_mut(2)
            .zip(self.as_ref().chunks_exact(2))
            .zip(other.as_ref().chunks_exact(2))
            .zip(ZETAS[63..].iter())
        {
            ta[0].basemul_acc(tb[0], *zeta, &mut tr[0]);
            ta[1].basemul_acc(tb[1], -*zeta, &mut tr[1]);
        }
    }
}

impl KyberPoly {
    #[inline(always)]
    fn set_scalar(&mut self, i: usize, value: i16) {
        self[i / 2].0[i % 2] = value;
    }

    /// Rejection sampling of 12-bit candidates below q from one XOF block.
    /// Fills coefficients starting at `ctr` and returns the number of filled coefficients.
    pub fn rej_uniform(&mut self, mut ctr: usize, bytes: &[u8; XOF_BLOCK_BYTES]) -> usize {
        debug_assert!(ctr <= KYBER_N);

        for buf in bytes.chunks_exact(3) {
            if ctr >= KYBER_N {
                break;
            }
            let val0 = (buf[0] as u16 | (buf[1] as u16) << 8) & 0xFFF;
            if val0 < KYBER_Q as u16 {
                self.set_scalar(ctr, val0 as i16);
                ctr += 1;
            }

            if ctr >= KYBER_N {
                break;
            }
            let val1 = ((buf[1] >> 4) as u16 | (buf[2] as u16) << 4) & 0xFFF;
            if val1 < KYBER_Q as u16 {
                self.set_scalar(ctr, val1 as i16);
                ctr += 1;
            }
        }
        ctr
    }

    /// Fills the polynomial with uniform coefficients in `[0, q)` read from an XOF stream.
    pub fn uniform<R: XofReader>(&mut self, xof: &mut R) {
        let mut block = [0u8; XOF_BLOCK_BYTES];
        let mut ctr = 0;
        while ctr < KYBER_N {
            xof.read(&mut block);
            ctr = self.rej_uniform(ctr, &block);
        }
        debug_assert_eq!(ctr, KYBER_N);
    }

    /// Centered binomial distribution with eta = 2: each coefficient is
    /// `(a0 + a1) - (b0 + b1)` over four consecutive bits of `buf`.
    pub fn cbd2(&mut self, buf: &[u8; NOISE_BYTES]) {
        const MASK55: u32 = 0x55_55_55_55;

        // one 32-bit word gives 8 coefficients
        for (r, bytes) in self.as_mut().chunks_exact_mut(4).zip(buf.chunks_exact(4)) {
            let t = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            let d = (t & MASK55) + ((t >> 1) & MASK55);
            for (j, c) in r.iter_mut().enumerate() {
                for (k, x) in c.0.iter_mut().enumerate() {
                    let shift = 8 * j + 4 * k;
                    let a = ((d >> shift) & 0x3) as i16;
                    let b = ((d >> (shift + 2)) & 0x3) as i16;
                    *x = a - b;
                }
            }
        }
    }

    /// Samples a noise polynomial from `PRF(seed, nonce)`
    pub fn getnoise(&mut self, seed: &[u8; KYBER_SYMBYTES], nonce: u8) {
        let mut buf = Zeroizing::new([0u8; NOISE_BYTES]);
        Prf::absorb_prf(seed, nonce).read(&mut buf[..]);
        self.cbd2(&buf);
    }

    pub fn into_array(&self) -> [<KyberFq as Field>::E; KYBER_N] {
        array_init::array_init(|i: usize| self[i / 2].0[i % 2])
    }

    pub fn from_array(coeffs: &[<KyberFq as Field>::E; KYBER_N]) -> Self {
        let mut poly = Self::default();
        for (f, c) in poly.as_mut().iter_mut().zip(coeffs.chunks_exact(2)) {
            f.0 = [c[0], c[1]];
        }
        poly
    }

    #[doc(hidden)]
    pub fn new_random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut poly = Self::default();
        fn frand<R: RngCore + CryptoRng>(rng: &mut R) -> i16 {
            rng.gen_range(-KYBER_Q / 2..=KYBER_Q / 2)
        }
        for c in poly.as_mut() {
            c.0[0] = frand(rng);
            c.0[1] = frand(rng);
        }
        poly
    }
}
