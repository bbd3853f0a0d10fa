use core::fmt::{Debug, Formatter};

use rand::{CryptoRng, RngCore};
use secrecy::{ExposeSecret, Secret};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::{Zeroize, Zeroizing};

use crate::ciphertext::Ciphertext;
use crate::params::{KYBER_SSBYTES, KYBER_SYMBYTES, PUBLIC_KEY_BYTES};
use crate::pke::{self, CpaPublicKey, CpaSecretKey};
use crate::symmetric::{hash_g, hash_h, kdf};
use crate::utils::split::ArraySplitter;

/// Entropy consumed by [`generate_key_from_entropy`]: `d || z`
pub const GENERATE_KEY_ENTROPY_BYTES: usize = 2 * KYBER_SYMBYTES;
/// Entropy consumed by [`encapsulate_from_entropy`]: the message `m`
pub const ENCAP_ENTROPY_BYTES: usize = KYBER_SYMBYTES;

/// A Kyber768 public key.
///
/// Holds the expanded matrix and `H(pk)` next to `t̂` and `ρ`; only the latter
/// two are part of the 1184-byte encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) cpa: CpaPublicKey,
    pub(crate) h_pk: [u8; KYBER_SYMBYTES],
}

/// A Kyber768 private key: `ŝ`, the public key, `H(pk)` and the rejection seed `z`.
#[derive(Clone)]
pub struct PrivateKey {
    pub(crate) cpa: CpaSecretKey,
    pub(crate) pk: PublicKey,
    pub(crate) z: [u8; KYBER_SYMBYTES],
}

/// The 32-byte shared secret. Wiped on drop.
pub struct SharedSecret(Secret<[u8; KYBER_SSBYTES]>);

impl PublicKey {
    pub(crate) fn from_cpa(cpa: CpaPublicKey) -> Self {
        let mut bytes = [0u8; PUBLIC_KEY_BYTES];
        cpa.to_bytes(&mut bytes);
        let h_pk = hash_h(&[&bytes]);
        PublicKey { cpa, h_pk }
    }

    /// `H(pk)`, SHA3-256 of the encoded key
    pub fn hash(&self) -> &[u8; KYBER_SYMBYTES] {
        &self.h_pk
    }
}

impl PrivateKey {
    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("pk", &self.pk)
            .finish_non_exhaustive()
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.cpa.zeroize();
        self.z.zeroize();
    }
}

impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes()[..].ct_eq(&other.to_bytes()[..])
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for PrivateKey {}

impl SharedSecret {
    fn new(bytes: [u8; KYBER_SSBYTES]) -> Self {
        SharedSecret(Secret::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; KYBER_SSBYTES] {
        self.0.expose_secret()
    }
}

impl ExposeSecret<[u8; KYBER_SSBYTES]> for SharedSecret {
    fn expose_secret(&self) -> &[u8; KYBER_SSBYTES] {
        self.0.expose_secret()
    }
}

impl Debug for SharedSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}

impl ConstantTimeEq for SharedSecret {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.as_bytes()[..].ct_eq(&other.as_bytes()[..])
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SharedSecret {}

/// Generates a key pair with randomness from `rng`: `d` is drawn first, then `z`.
pub fn generate_key<R: RngCore + CryptoRng>(rng: &mut R) -> PrivateKey {
    let mut entropy = Zeroizing::new([0u8; GENERATE_KEY_ENTROPY_BYTES]);
    rng.fill_bytes(&mut entropy[..]);
    generate_key_from_entropy(&entropy)
}

/// Deterministic key generation from `d || z`
pub fn generate_key_from_entropy(entropy: &[u8; GENERATE_KEY_ENTROPY_BYTES]) -> PrivateKey {
    let (d, z): ([u8; KYBER_SYMBYTES], [u8; KYBER_SYMBYTES]) = entropy.dissect();
    let d = Zeroizing::new(d);

    let mut cpa_sk = CpaSecretKey::default();
    let mut cpa_pk = CpaPublicKey::default();
    pke::keypair(&d, &mut cpa_sk, &mut cpa_pk);

    PrivateKey {
        cpa: cpa_sk,
        pk: PublicKey::from_cpa(cpa_pk),
        z,
    }
}

/// Returns the public half of `sk`; nothing is recomputed.
pub fn public_from_private(sk: &PrivateKey) -> PublicKey {
    sk.pk.clone()
}

/// Encapsulates a fresh shared secret to `pk`
pub fn encapsulate<R: RngCore + CryptoRng>(
    pk: &PublicKey,
    rng: &mut R,
) -> (Ciphertext, SharedSecret) {
    let mut m = Zeroizing::new([0u8; ENCAP_ENTROPY_BYTES]);
    rng.fill_bytes(&mut m[..]);
    encapsulate_from_entropy(pk, &m)
}

/// Deterministic encapsulation with the message `m`.
///
/// `m` must be uniformly random and secret; it is used as the message without
/// further hashing.
pub fn encapsulate_from_entropy(
    pk: &PublicKey,
    m: &[u8; ENCAP_ENTROPY_BYTES],
) -> (Ciphertext, SharedSecret) {
    let kr = Zeroizing::new(hash_g(&[m, &pk.h_pk]));
    let (k_bar, coins): ([u8; KYBER_SYMBYTES], [u8; KYBER_SYMBYTES]) = kr.dissect();
    let (k_bar, coins) = (Zeroizing::new(k_bar), Zeroizing::new(coins));

    let mut ct = Ciphertext::default();
    pke::encrypt(m, &pk.cpa, &coins, &mut ct);

    let mut ss = kdf(&[&k_bar[..], &hash_h(&[ct.as_ref()])]);
    let shared_secret = SharedSecret::new(ss);
    ss.zeroize();
    (ct, shared_secret)
}

/// Decapsulates `ct` with `sk`.
///
/// Never fails: an invalid ciphertext yields `KDF(z || H(ct))`, which cannot be
/// told apart from a valid secret without `z`. The secret must be confirmed by
/// the protocol, e.g. with an authenticated-encryption check.
pub fn decapsulate(sk: &PrivateKey, ct: &Ciphertext) -> SharedSecret {
    let mut m = Zeroizing::new([0u8; KYBER_SYMBYTES]);
    pke::decrypt(ct, &sk.cpa, &mut m);

    let kr = Zeroizing::new(hash_g(&[&m[..], &sk.pk.h_pk]));
    let (k_bar, coins): ([u8; KYBER_SYMBYTES], [u8; KYBER_SYMBYTES]) = kr.dissect();
    let (k_bar, coins) = (Zeroizing::new(k_bar), Zeroizing::new(coins));

    let mut ct_prime = Ciphertext::default();
    pke::encrypt(&m, &sk.pk.cpa, &coins, &mut ct_prime);

    let accept = ct_prime.ct_eq(ct);
    let mut selected = Zeroizing::new([0u8; KYBER_SYMBYTES]);
    for ((s, k), z) in selected.iter_mut().zip(k_bar.iter()).zip(sk.z.iter()) {
        *s = u8::conditional_select(z, k, accept);
    }

    let mut ss = kdf(&[&selected[..], &hash_h(&[ct.as_ref()])]);
    let shared_secret = SharedSecret::new(ss);
    ss.zeroize();
    shared_secret
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::params::{CIPHERTEXT_BYTES, PRIVATE_KEY_BYTES};

    #[test]
    fn round_trip() {
        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            let sk = generate_key(&mut rng);
            let pk = public_from_private(&sk);
            let (ct, ss) = encapsulate(&pk, &mut rng);
            assert_eq!(decapsulate(&sk, &ct), ss);
        }
    }

    #[test]
    fn private_key_layout() {
        let mut entropy = [0u8; GENERATE_KEY_ENTROPY_BYTES];
        rand::thread_rng().fill(&mut entropy[..]);
        let sk = generate_key_from_entropy(&entropy);

        let bytes = sk.to_bytes();
        assert_eq!(bytes.len(), PRIVATE_KEY_BYTES);
        assert_eq!(&bytes[PRIVATE_KEY_BYTES - 32..], &entropy[32..]);
        assert_eq!(&bytes[PRIVATE_KEY_BYTES - 64..PRIVATE_KEY_BYTES - 32], sk.pk.hash());
        assert_eq!(
            &bytes[PRIVATE_KEY_BYTES - 64 - PUBLIC_KEY_BYTES..PRIVATE_KEY_BYTES - 64],
            &sk.pk.to_bytes()[..]
        );
        assert_eq!(sk.pk.hash(), &hash_h(&[&sk.pk.to_bytes()]));
    }

    #[test]
    fn implicit_rejection() {
        let mut rng = rand::thread_rng();
        let sk = generate_key(&mut rng);
        let other = generate_key(&mut rng);
        let (ct, ss) = encapsulate(sk.public_key(), &mut rng);

        let mut raw = ct.into_bytes();
        raw[rng.gen_range(0..CIPHERTEXT_BYTES)] ^= 1u8 << rng.gen_range(0..8u32);
        let tampered = Ciphertext::from(raw);

        let rejected = decapsulate(&sk, &tampered);
        assert_ne!(rejected, ss);
        assert_eq!(rejected, decapsulate(&sk, &tampered));
        assert_ne!(rejected, decapsulate(&other, &tampered));
        assert_eq!(rejected.as_bytes(), &kdf(&[&sk.z, &hash_h(&[&raw])]));
    }

    #[test]
    fn shared_secret_debug_is_redacted() {
        let ss = SharedSecret::new([0xAB; KYBER_SSBYTES]);
        extern crate std;
        let dbg = std::format!("{:?}", ss);
        assert!(!dbg.contains("ab") && !dbg.contains("171"));
    }
}
