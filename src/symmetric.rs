//! Hash, XOF, PRF and KDF instances over the SHA-3 family.
//!
//! * H = SHA3-256, G = SHA3-512
//! * XOF = SHAKE128, PRF(s, n) = SHAKE256(s || n)
//! * KDF = SHAKE256 with 32 bytes of output

use sha3::digest::{ExtendableOutput, Update};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256};

use crate::params::{KYBER_SSBYTES, KYBER_SYMBYTES};

pub type Xof = Shake128;
pub type Prf = Shake256;

/// SHAKE128 rate
pub const XOF_BLOCK_BYTES: usize = 168;

pub trait CrystalsXof: Default + Update + ExtendableOutput {
    /// Absorbs `seed || i || j` and switches to squeezing
    #[inline]
    fn absorb_xof_with_nonces(seed: &[u8; KYBER_SYMBYTES], i: u8, j: u8) -> Self::Reader {
        let mut xof = Self::default();
        Update::update(&mut xof, seed);
        Update::update(&mut xof, &[i, j]);
        xof.finalize_xof()
    }
}

impl CrystalsXof for Xof {}

pub trait CrystalsPrf: Default + Update + ExtendableOutput {
    /// Absorbs `seed || nonce` and switches to squeezing
    #[inline]
    fn absorb_prf(seed: &[u8; KYBER_SYMBYTES], nonce: u8) -> Self::Reader {
        let mut prf = Self::default();
        Update::update(&mut prf, seed);
        Update::update(&mut prf, &[nonce]);
        prf.finalize_xof()
    }
}

impl CrystalsPrf for Prf {}

/// H: SHA3-256 of the concatenation of `parts`
pub fn hash_h(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha3_256::default();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// G: SHA3-512 of the concatenation of `parts`
pub fn hash_g(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Sha3_512::default();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// KDF: SHAKE256 of the concatenation of `parts`, squeezed to a shared secret
pub fn kdf(parts: &[&[u8]]) -> [u8; KYBER_SSBYTES] {
    let mut shake = Shake256::default();
    for part in parts {
        Update::update(&mut shake, part);
    }
    let mut out = [0u8; KYBER_SSBYTES];
    shake.finalize_xof_into(&mut out);
    out
}
