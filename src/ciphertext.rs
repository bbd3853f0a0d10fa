use core::fmt::{Debug, Formatter};

use subtle::{Choice, ConstantTimeEq};

use crate::error::{KyberError, Result};
use crate::params::{CIPHERTEXT_BYTES, KYBER_DU, KYBER_DV, KYBER_K, POLYVEC_COMPRESSED_BYTES};
use crate::poly::kyber::KyberPoly;
use crate::polyvec::KyberPolyVec;

/// A Kyber768 ciphertext: `Compress_10(u) || Compress_4(v)`.
#[derive(Clone, PartialEq, Eq)]
pub struct Ciphertext([u8; CIPHERTEXT_BYTES]);

impl Default for Ciphertext {
    fn default() -> Self {
        Ciphertext([0u8; CIPHERTEXT_BYTES])
    }
}

impl Debug for Ciphertext {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Ciphertext(")?;
        for b in self.0.iter() {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

impl Ciphertext {
    pub const LEN: usize = CIPHERTEXT_BYTES;

    pub fn as_bytes(&self) -> &[u8; CIPHERTEXT_BYTES] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; CIPHERTEXT_BYTES] {
        self.0
    }

    /// The compressed polynomial `v`
    pub fn poly_bytes(&self) -> &[u8] {
        &self.0[POLYVEC_COMPRESSED_BYTES..]
    }

    /// The compressed vector `u`
    pub fn polyvec_bytes(&self) -> &[u8] {
        &self.0[..POLYVEC_COMPRESSED_BYTES]
    }

    fn poly_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.0[POLYVEC_COMPRESSED_BYTES..]
    }

    fn polyvec_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.0[..POLYVEC_COMPRESSED_BYTES]
    }

    pub(crate) fn compress_poly(&mut self, v: &KyberPoly) {
        v.compress::<KYBER_DV>(self.poly_bytes_mut());
    }

    pub(crate) fn decompress_poly(&self, v: &mut KyberPoly) {
        v.decompress::<KYBER_DV>(self.poly_bytes());
    }

    pub(crate) fn compress_polyvec(&mut self, u: &KyberPolyVec<KYBER_K>) {
        u.compress::<KYBER_DU>(self.polyvec_bytes_mut());
    }

    pub(crate) fn decompress_polyvec(&self, u: &mut KyberPolyVec<KYBER_K>) {
        u.decompress::<KYBER_DU>(self.polyvec_bytes());
    }
}

impl AsRef<[u8]> for Ciphertext {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; CIPHERTEXT_BYTES]> for Ciphertext {
    fn from(bytes: [u8; CIPHERTEXT_BYTES]) -> Self {
        Ciphertext(bytes)
    }
}

impl TryFrom<&[u8]> for Ciphertext {
    type Error = KyberError;

    /// Accepts exactly `CIPHERTEXT_BYTES` bytes
    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes = <[u8; CIPHERTEXT_BYTES]>::try_from(bytes).map_err(|_| {
            debug!("rejecting ciphertext of {} bytes", bytes.len());
            KyberError::malformed("ciphertext", "wrong length")
        })?;
        Ok(Ciphertext(bytes))
    }
}

impl ConstantTimeEq for Ciphertext {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::POLY_COMPRESSED_BYTES;

    #[test]
    fn strict_length() {
        let bytes = [7u8; CIPHERTEXT_BYTES + 1];
        assert!(Ciphertext::try_from(&bytes[..CIPHERTEXT_BYTES - 1]).is_err());
        assert_eq!(
            Ciphertext::try_from(&bytes[..]),
            Err(KyberError::malformed("ciphertext", "wrong length"))
        );
        let ct = Ciphertext::try_from(&bytes[..CIPHERTEXT_BYTES]).expect("exact length");
        assert_eq!(ct.as_bytes(), &[7u8; CIPHERTEXT_BYTES]);
    }

    #[test]
    fn layout() {
        let mut raw = [0u8; CIPHERTEXT_BYTES];
        raw[POLYVEC_COMPRESSED_BYTES - 1] = 1;
        raw[POLYVEC_COMPRESSED_BYTES] = 2;
        let ct = Ciphertext::from(raw);
        assert_eq!(ct.polyvec_bytes().len(), 960);
        assert_eq!(ct.poly_bytes().len(), POLY_COMPRESSED_BYTES);
        assert_eq!(ct.polyvec_bytes().last(), Some(&1));
        assert_eq!(ct.poly_bytes().first(), Some(&2));
    }

    #[test]
    fn constant_time_eq() {
        let a = Ciphertext::from([1u8; CIPHERTEXT_BYTES]);
        let mut raw = [1u8; CIPHERTEXT_BYTES];
        assert!(bool::from(a.ct_eq(&Ciphertext::from(raw))));
        raw[CIPHERTEXT_BYTES - 1] ^= 0x80;
        assert!(!bool::from(a.ct_eq(&Ciphertext::from(raw))));
    }
}
