//! Fixed-size wire encodings of keys.
//!
//! Public key: `t̂ || ρ` (1184 bytes). Private key: `ŝ || pk || H(pk) || z`
//! (2400 bytes). Parsing is strict: the length must match exactly, every packed
//! coefficient must be below q and the embedded `H(pk)` must match.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::{KyberError, Result};
use crate::kem::{PrivateKey, PublicKey};
use crate::params::{KYBER_SYMBYTES, POLYVEC_BYTES, PRIVATE_KEY_BYTES, PUBLIC_KEY_BYTES};
use crate::pke::{CpaPublicKey, CpaSecretKey};

const SK_PK_OFFSET: usize = POLYVEC_BYTES;
const SK_HASH_OFFSET: usize = SK_PK_OFFSET + PUBLIC_KEY_BYTES;
const SK_Z_OFFSET: usize = SK_HASH_OFFSET + KYBER_SYMBYTES;

static_assertions::const_assert_eq!(SK_Z_OFFSET + KYBER_SYMBYTES, PRIVATE_KEY_BYTES);

impl PublicKey {
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_BYTES] {
        let mut bytes = [0u8; PUBLIC_KEY_BYTES];
        self.cpa.to_bytes(&mut bytes);
        bytes
    }

    /// Parses exactly [`PUBLIC_KEY_BYTES`] bytes and expands the matrix.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let cpa = CpaPublicKey::from_bytes(bytes).map_err(|e| {
            debug!("rejecting public key of {} bytes: {:?}", bytes.len(), e);
            e
        })?;
        Ok(PublicKey::from_cpa(cpa))
    }
}

impl PrivateKey {
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_BYTES]> {
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_BYTES]);
        let (s_bytes, rest) = bytes.split_at_mut(SK_PK_OFFSET);
        let (pk_bytes, rest) = rest.split_at_mut(PUBLIC_KEY_BYTES);
        let (h_bytes, z_bytes) = rest.split_at_mut(KYBER_SYMBYTES);

        let mut s = Zeroizing::new([0u8; POLYVEC_BYTES]);
        self.cpa.to_bytes(&mut s);
        s_bytes.copy_from_slice(&s[..]);
        pk_bytes.copy_from_slice(&self.pk.to_bytes());
        h_bytes.copy_from_slice(&self.pk.h_pk);
        z_bytes.copy_from_slice(&self.z);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_BYTES {
            debug!("rejecting private key of {} bytes", bytes.len());
            return Err(KyberError::malformed("private key", "wrong length"));
        }
        let (s_bytes, rest) = bytes.split_at(SK_PK_OFFSET);
        let (pk_bytes, rest) = rest.split_at(PUBLIC_KEY_BYTES);
        let (h_bytes, z_bytes) = rest.split_at(KYBER_SYMBYTES);

        let cpa = CpaSecretKey::from_bytes(s_bytes)?;
        let pk = PublicKey::from_bytes(pk_bytes)?;
        if !bool::from(pk.h_pk[..].ct_eq(h_bytes)) {
            debug!("rejecting private key: embedded public key hash does not match");
            return Err(KyberError::malformed("private key", "public key hash mismatch"));
        }
        let z = <[u8; KYBER_SYMBYTES]>::try_from(z_bytes)
            .map_err(|_| KyberError::malformed("private key", "wrong length"))?;

        Ok(PrivateKey { cpa, pk, z })
    }
}

/// Parses a public key, see [`PublicKey::from_bytes`]
pub fn parse_public_key(bytes: &[u8]) -> Result<PublicKey> {
    PublicKey::from_bytes(bytes)
}

/// Parses a private key, see [`PrivateKey::from_bytes`]
pub fn parse_private_key(bytes: &[u8]) -> Result<PrivateKey> {
    PrivateKey::from_bytes(bytes)
}

#[cfg(feature = "alloc")]
fn reserve(out: &mut Vec<u8>, additional: usize) -> Result<()> {
    out.try_reserve(additional).map_err(|_| {
        debug!("failed to reserve {} bytes", additional);
        KyberError::AllocationFailure {
            requested: additional,
        }
    })
}

/// Appends the encoding of `pk` to `out`
#[cfg(feature = "alloc")]
pub fn marshal_public_key(out: &mut Vec<u8>, pk: &PublicKey) -> Result<()> {
    reserve(out, PUBLIC_KEY_BYTES)?;
    out.extend_from_slice(&pk.to_bytes());
    Ok(())
}

/// Appends the encoding of `sk` to `out`. The caller owns the secret bytes.
#[cfg(feature = "alloc")]
pub fn marshal_private_key(out: &mut Vec<u8>, sk: &PrivateKey) -> Result<()> {
    reserve(out, PRIVATE_KEY_BYTES)?;
    out.extend_from_slice(&sk.to_bytes()[..]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::field::kyber::KYBER_Q;
    use crate::kem::generate_key;

    #[test]
    fn keys_round_trip() {
        let sk = generate_key(&mut rand::thread_rng());
        let pk_bytes = sk.public_key().to_bytes();
        let sk_bytes = sk.to_bytes();

        assert_eq!(parse_public_key(&pk_bytes).as_ref(), Ok(sk.public_key()));
        assert!(parse_private_key(&sk_bytes[..]) == Ok(sk.clone()));
        assert_eq!(parse_private_key(&sk_bytes[..]).map(|k| k.z), Ok(sk.z));
    }

    #[test]
    fn rejects_wrong_lengths() {
        let sk = generate_key(&mut rand::thread_rng());
        let pk_bytes = sk.public_key().to_bytes();
        let sk_bytes = sk.to_bytes();

        assert!(parse_public_key(&pk_bytes[..PUBLIC_KEY_BYTES - 1]).is_err());
        let mut long = [0u8; PUBLIC_KEY_BYTES + 1];
        long[..PUBLIC_KEY_BYTES].copy_from_slice(&pk_bytes);
        assert!(parse_public_key(&long).is_err());

        assert_eq!(
            parse_private_key(&sk_bytes[..PRIVATE_KEY_BYTES - 1]).err(),
            Some(KyberError::malformed("private key", "wrong length"))
        );
        assert!(parse_private_key(&[0u8; PRIVATE_KEY_BYTES + 1]).is_err());
    }

    #[test]
    fn rejects_unreduced_coefficients() {
        let mut rng = rand::thread_rng();
        let sk = generate_key(&mut rng);
        let mut pk_bytes = sk.public_key().to_bytes();

        // first coefficient of a random polynomial set to q
        let poly = rng.gen_range(0..3) * 384;
        pk_bytes[poly] = (KYBER_Q & 0xFF) as u8;
        pk_bytes[poly + 1] = (pk_bytes[poly + 1] & 0xF0) | (KYBER_Q >> 8) as u8;
        assert_eq!(
            parse_public_key(&pk_bytes).err(),
            Some(KyberError::malformed("polynomial", "coefficient not reduced modulo q"))
        );

        let mut sk_bytes = sk.to_bytes();
        sk_bytes[0] = 0xFF;
        sk_bytes[1] |= 0x0F;
        assert!(parse_private_key(&sk_bytes[..]).is_err());
    }

    #[test]
    fn rejects_hash_mismatch() {
        let sk = generate_key(&mut rand::thread_rng());
        let mut sk_bytes = sk.to_bytes();
        sk_bytes[SK_HASH_OFFSET] ^= 1;
        assert_eq!(
            parse_private_key(&sk_bytes[..]).err(),
            Some(KyberError::malformed("private key", "public key hash mismatch"))
        );
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn marshal_appends() {
        let sk = generate_key(&mut rand::thread_rng());
        let mut out = alloc::vec![0xEEu8];
        marshal_public_key(&mut out, sk.public_key()).expect("reserve");
        marshal_private_key(&mut out, &sk).expect("reserve");

        assert_eq!(out.len(), 1 + PUBLIC_KEY_BYTES + PRIVATE_KEY_BYTES);
        assert_eq!(out[0], 0xEE);
        assert_eq!(&out[1..1 + PUBLIC_KEY_BYTES], &sk.public_key().to_bytes()[..]);
        assert_eq!(&out[1 + PUBLIC_KEY_BYTES..], &sk.to_bytes()[..]);
    }
}
