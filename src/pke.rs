//! IND-CPA public-key encryption underlying the KEM.

use zeroize::{Zeroize, Zeroizing};

use crate::ciphertext::Ciphertext;
use crate::error::{KyberError, Result};
use crate::params::{KYBER_K, KYBER_SYMBYTES, MSG_BYTES, POLYVEC_BYTES, PUBLIC_KEY_BYTES};
use crate::poly::{kyber::KyberPoly, Polynomial};
use crate::polymat::KyberMatrix;
use crate::polyvec::KyberPolyVec;
use crate::symmetric::hash_g;
use crate::utils::split::ArraySplitter;

/// `t̂ = Â∘ŝ + ê` (canonical coefficients, NTT domain) and the seed `ρ` of `Â`.
///
/// The expanded matrix is kept next to its seed so encryption does not sample it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpaPublicKey {
    pub(crate) t_hat: KyberPolyVec<KYBER_K>,
    pub(crate) rho: [u8; KYBER_SYMBYTES],
    pub(crate) a: KyberMatrix<KYBER_K>,
}

impl Default for CpaPublicKey {
    fn default() -> Self {
        CpaPublicKey {
            t_hat: Default::default(),
            rho: [0u8; KYBER_SYMBYTES],
            a: Default::default(),
        }
    }
}

/// `ŝ` with canonical coefficients, NTT domain
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CpaSecretKey {
    pub(crate) s_hat: KyberPolyVec<KYBER_K>,
}

impl Zeroize for CpaSecretKey {
    fn zeroize(&mut self) {
        self.s_hat.zeroize();
    }
}

impl CpaPublicKey {
    pub fn new(t_hat: KyberPolyVec<KYBER_K>, rho: [u8; KYBER_SYMBYTES]) -> Self {
        let a = KyberMatrix::expand(&rho);
        CpaPublicKey { t_hat, rho, a }
    }

    pub fn to_bytes(&self, bytes: &mut [u8; PUBLIC_KEY_BYTES]) {
        let (t_bytes, rho_bytes) = bytes.split_at_mut(POLYVEC_BYTES);
        self.t_hat.to_bytes(t_bytes);
        rho_bytes.copy_from_slice(&self.rho);
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PUBLIC_KEY_BYTES {
            return Err(KyberError::malformed("public key", "wrong length"));
        }
        let (t_bytes, rho_bytes) = bytes.split_at(POLYVEC_BYTES);
        let t_hat = KyberPolyVec::from_bytes(t_bytes)?;
        let rho = <[u8; KYBER_SYMBYTES]>::try_from(rho_bytes)
            .map_err(|_| KyberError::malformed("public key", "wrong seed length"))?;
        Ok(Self::new(t_hat, rho))
    }
}

impl CpaSecretKey {
    pub fn to_bytes(&self, bytes: &mut [u8; POLYVEC_BYTES]) {
        self.s_hat.to_bytes(bytes);
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(CpaSecretKey {
            s_hat: KyberPolyVec::from_bytes(bytes)?,
        })
    }
}

/// Deterministic key generation from the 32-byte seed `d`
pub fn keypair(d: &[u8; KYBER_SYMBYTES], sk: &mut CpaSecretKey, pk: &mut CpaPublicKey) {
    let buf = Zeroizing::new(hash_g(&[d]));
    let (public_seed, noise_seed): ([u8; KYBER_SYMBYTES], [u8; KYBER_SYMBYTES]) = buf.dissect();
    let noise_seed = Zeroizing::new(noise_seed);

    pk.rho = public_seed;
    pk.a = KyberMatrix::expand(&public_seed);

    let s_hat = &mut sk.s_hat;
    s_hat.getnoise_eta1(&noise_seed, 0);
    s_hat.ntt_and_reduce();

    let mut e = KyberPolyVec::<KYBER_K>::default();
    e.getnoise_eta1(&noise_seed, KYBER_K as u8);
    e.ntt_and_reduce();

    pk.a.mul_vec(s_hat, &mut pk.t_hat);
    pk.t_hat.to_mont();
    pk.t_hat += &e;
    pk.t_hat.freeze();
    s_hat.freeze();

    e.zeroize();
}

/// Encrypts `msg` under `pk` with the explicit randomness `coins`
pub fn encrypt(
    msg: &[u8; MSG_BYTES],
    pk: &CpaPublicKey,
    coins: &[u8; KYBER_SYMBYTES],
    ct: &mut Ciphertext,
) {
    let mut r = KyberPolyVec::<KYBER_K>::default();
    r.getnoise_eta1(coins, 0);
    r.ntt_and_reduce();

    let mut e1 = KyberPolyVec::<KYBER_K>::default();
    e1.getnoise_eta2(coins, KYBER_K as u8);
    let mut e2 = KyberPoly::default();
    e2.getnoise(coins, 2 * KYBER_K as u8);

    let mut u = KyberPolyVec::<KYBER_K>::default();
    pk.a.mul_vec_transposed(&r, &mut u);
    u.inv_ntt();
    u += &e1;
    u.reduce();
    ct.compress_polyvec(&u);

    let mut v = KyberPoly::default();
    pk.t_hat.basemul_acc(&r, &mut v);
    v.inv_ntt();
    v += &e2;
    v += &KyberPoly::from_message(msg);
    v.reduce();
    ct.compress_poly(&v);

    r.zeroize();
    e1.zeroize();
    e2.zeroize();
    v.zeroize();
}

pub fn decrypt(ct: &Ciphertext, sk: &CpaSecretKey, msg: &mut [u8; MSG_BYTES]) {
    let mut u = KyberPolyVec::<KYBER_K>::default();
    ct.decompress_polyvec(&mut u);
    u.ntt_and_reduce();

    let mut mp = KyberPoly::default();
    sk.s_hat.basemul_acc(&u, &mut mp);
    mp.inv_ntt();

    let mut v = KyberPoly::default();
    ct.decompress_poly(&mut v);
    v -= &mp;
    v.reduce();

    v.to_message(msg);

    mp.zeroize();
    v.zeroize();
}
