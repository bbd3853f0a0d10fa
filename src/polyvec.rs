use core::ops::{AddAssign, Index, IndexMut, SubAssign};

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{KyberError, Result};
use crate::params::{poly_compressed_bytes, KYBER_SYMBYTES, POLYBYTES};
use crate::poly::{kyber::KyberPoly, Polynomial};
use crate::symmetric::{CrystalsXof, Xof};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolyVec<P, const N: usize, const K: usize>([P; K])
where
    P: Polynomial<N>;

impl<P, const N: usize, const K: usize> Default for PolyVec<P, N, K>
where
    P: Polynomial<N>,
{
    fn default() -> Self {
        PolyVec([P::default(); K])
    }
}

impl<P, const N: usize, const K: usize> Zeroize for PolyVec<P, N, K>
where
    P: Polynomial<N>,
{
    fn zeroize(&mut self) {
        for poly in self {
            poly.zeroize();
        }
    }
}

impl<P, const N: usize, const K: usize> Index<usize> for PolyVec<P, N, K>
where
    P: Polynomial<N>,
{
    type Output = P;
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl<P, const N: usize, const K: usize> IndexMut<usize> for PolyVec<P, N, K>
where
    P: Polynomial<N>,
{
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

impl<P, const N: usize, const K: usize> AsRef<[P; K]> for PolyVec<P, N, K>
where
    P: Polynomial<N>,
{
    #[inline(always)]
    fn as_ref(&self) -> &[P; K] {
        &self.0
    }
}

impl<P, const N: usize, const K: usize> AsMut<[P; K]> for PolyVec<P, N, K>
where
    P: Polynomial<N>,
{
    #[inline(always)]
    fn as_mut(&mut self) -> &mut [P; K] {
        &mut self.0
    }
}

impl<'a, P, const N: usize, const K: usize> IntoIterator for &'a mut PolyVec<P, N, K>
where
    P: Polynomial<N>,
{
    type Item = &'a mut P;

    type IntoIter = core::slice::IterMut<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

impl<'a, P, const N: usize, const K: usize> IntoIterator for &'a PolyVec<P, N, K>
where
    P: Polynomial<N>,
{
    type Item = &'a P;

    type IntoIter = core::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<P, const N: usize, const K: usize> AddAssign<&Self> for PolyVec<P, N, K>
where
    P: Polynomial<N>,
{
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.into_iter().zip(rhs) {
            *a += b;
        }
    }
}

impl<P, const N: usize, const K: usize> SubAssign<&Self> for PolyVec<P, N, K>
where
    P: Polynomial<N>,
{
    fn sub_assign(&mut self, rhs: &Self) {
        for (a, b) in self.into_iter().zip(rhs) {
            *a -= b;
        }
    }
}

impl<P, const N: usize, const K: usize> PolyVec<P, N, K>
where
    P: Polynomial<N>,
{
    #[inline]
    pub fn ntt(&mut self) {
        for poly in self {
            poly.ntt();
        }
    }

    #[inline]
    pub fn ntt_and_reduce(&mut self) {
        for poly in self {
            poly.ntt_and_reduce();
        }
    }

    #[inline]
    pub fn inv_ntt(&mut self) {
        for poly in self {
            poly.inv_ntt();
        }
    }

    #[inline]
    pub fn reduce(&mut self) {
        for poly in self {
            poly.reduce();
        }
    }

    #[inline]
    pub fn freeze(&mut self) {
        for poly in self {
            poly.freeze();
        }
    }

    #[inline]
    pub fn to_mont(&mut self) {
        for poly in self {
            poly.to_mont();
        }
    }

    /// Inner product in the NTT domain: `result = sum_i self[i] ∘ other[i]`, reduced
    pub fn basemul_acc(&self, other: &Self, result: &mut P) {
        let mut pairs = self.into_iter().zip(other);
        if let Some((left, right)) = pairs.next() {
            left.pointwise(right, result);
        }
        for (left, right) in pairs {
            left.pointwise_acc(right, result);
        }
        result.reduce();
    }
}

pub type KyberPolyVec<const K: usize> = PolyVec<KyberPoly, { KyberPoly::N }, K>;

impl<const K: usize> KyberPolyVec<K> {
    #[doc(hidden)]
    pub fn new_random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut pv = Self::default();
        for poly in &mut pv {
            *poly = KyberPoly::new_random(rng);
        }
        pv
    }

    /// Row `i` of the matrix: `self[j] = Parse(XOF(seed || j || i))`
    #[inline]
    pub fn uniform_xof(&mut self, seed: &[u8; KYBER_SYMBYTES], i: u8) {
        for (j, poly) in self.into_iter().enumerate() {
            let mut xof = Xof::absorb_xof_with_nonces(seed, j as u8, i);
            poly.uniform(&mut xof);
        }
    }

    /// Samples with nonces `nonce .. nonce + K`
    #[inline]
    pub fn getnoise_eta1(&mut self, seed: &[u8; KYBER_SYMBYTES], nonce: u8) {
        for (i, poly) in self.into_iter().enumerate() {
            poly.getnoise(seed, nonce + i as u8);
        }
    }

    /// Samples with nonces `nonce .. nonce + K`
    #[inline]
    pub fn getnoise_eta2(&mut self, seed: &[u8; KYBER_SYMBYTES], nonce: u8) {
        // both noise distributions are CBD_2 for K = 3
        self.getnoise_eta1(seed, nonce);
    }

    pub fn to_bytes(&self, bytes: &mut [u8]) {
        debug_assert_eq!(bytes.len(), K * POLYBYTES);
        for (poly, chunk) in self.into_iter().zip(bytes.chunks_exact_mut(POLYBYTES)) {
            let mut out = [0u8; POLYBYTES];
            poly.to_bytes(&mut out);
            chunk.copy_from_slice(&out);
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != K * POLYBYTES {
            return Err(KyberError::malformed("polynomial vector", "wrong length"));
        }
        let mut pv = Self::default();
        for (poly, chunk) in (&mut pv).into_iter().zip(bytes.chunks_exact(POLYBYTES)) {
            *poly = KyberPoly::from_bytes(chunk)?;
        }
        Ok(pv)
    }

    #[inline]
    pub fn compress<const D: usize>(&self, bytes: &mut [u8]) {
        debug_assert_eq!(bytes.len(), K * poly_compressed_bytes(D));
        for (poly, chunk) in self
            .into_iter()
            .zip(bytes.chunks_exact_mut(poly_compressed_bytes(D)))
        {
            poly.compress::<D>(chunk);
        }
    }

    #[inline]
    pub fn decompress<const D: usize>(&mut self, bytes: &[u8]) {
        debug_assert_eq!(bytes.len(), K * poly_compressed_bytes(D));
        for (poly, chunk) in self
            .into_iter()
            .zip(bytes.chunks_exact(poly_compressed_bytes(D)))
        {
            poly.decompress::<D>(chunk);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::kyber::KYBER_Q;
    use crate::params::{KYBER_K, POLYVEC_BYTES};

    #[test]
    fn basemul_acc_is_sum_of_products() {
        let mut rng = rand::thread_rng();
        let a = KyberPolyVec::<KYBER_K>::new_random(&mut rng);
        let b = KyberPolyVec::<KYBER_K>::new_random(&mut rng);

        let mut expected = KyberPoly::default();
        for i in 0..KYBER_K {
            let mut t = KyberPoly::default();
            a[i].pointwise(&b[i], &mut t);
            expected += &t;
        }
        expected.freeze();

        // result is overwritten, not accumulated into
        let mut r = KyberPoly::new_random(&mut rng);
        a.basemul_acc(&b, &mut r);
        assert!(r.into_array().iter().all(|x| x.abs() <= KYBER_Q / 2));
        r.freeze();
        assert_eq!(r, expected);
    }

    #[test]
    fn bytes_round_trip_and_length() {
        let mut rng = rand::thread_rng();
        let mut pv = KyberPolyVec::<KYBER_K>::new_random(&mut rng);
        let mut bytes = [0u8; POLYVEC_BYTES];
        pv.to_bytes(&mut bytes);
        pv.freeze();
        assert_eq!(KyberPolyVec::<KYBER_K>::from_bytes(&bytes), Ok(pv));
        assert!(KyberPolyVec::<KYBER_K>::from_bytes(&bytes[1..]).is_err());
    }

    #[test]
    fn noise_nonces_are_consecutive() {
        let seed = [0x42u8; KYBER_SYMBYTES];
        let mut pv = KyberPolyVec::<KYBER_K>::default();
        pv.getnoise_eta1(&seed, 3);
        for (i, poly) in pv.as_ref().iter().enumerate() {
            let mut expected = KyberPoly::default();
            expected.getnoise(&seed, 3 + i as u8);
            assert_eq!(poly, &expected);
        }
    }
}
