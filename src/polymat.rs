use core::ops::{Index, IndexMut};

use zeroize::Zeroize;

use crate::params::KYBER_SYMBYTES;
use crate::poly::{kyber::KyberPoly, Polynomial};
use crate::polyvec::PolyVec;

/// `K` rows of `L`-polynomial vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolyMat<P, const N: usize, const K: usize, const L: usize>([PolyVec<P, N, L>; K])
where
    P: Polynomial<N>;

impl<P, const N: usize, const K: usize, const L: usize> Default for PolyMat<P, N, K, L>
where
    P: Polynomial<N>,
{
    #[inline]
    fn default() -> Self {
        Self([PolyVec::default(); K])
    }
}

impl<P, const N: usize, const K: usize, const L: usize> Zeroize for PolyMat<P, N, K, L>
where
    P: Polynomial<N>,
{
    fn zeroize(&mut self) {
        for row in self.0.iter_mut() {
            row.zeroize();
        }
    }
}

impl<P, const N: usize, const K: usize, const L: usize> Index<usize> for PolyMat<P, N, K, L>
where
    P: Polynomial<N>,
{
    type Output = PolyVec<P, N, L>;

    #[inline(always)]
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl<P, const N: usize, const K: usize, const L: usize> IndexMut<usize> for PolyMat<P, N, K, L>
where
    P: Polynomial<N>,
{
    #[inline(always)]
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

impl<P, const N: usize, const K: usize, const L: usize> AsRef<[PolyVec<P, N, L>; K]>
    for PolyMat<P, N, K, L>
where
    P: Polynomial<N>,
{
    #[inline(always)]
    fn as_ref(&self) -> &[PolyVec<P, N, L>; K] {
        &self.0
    }
}

impl<P, const N: usize, const K: usize, const L: usize> AsMut<[PolyVec<P, N, L>; K]>
    for PolyMat<P, N, K, L>
where
    P: Polynomial<N>,
{
    #[inline(always)]
    fn as_mut(&mut self) -> &mut [PolyVec<P, N, L>; K] {
        &mut self.0
    }
}

impl<P, const N: usize, const K: usize, const L: usize> PolyMat<P, N, K, L>
where
    P: Polynomial<N>,
{
    /// `out = self ∘ v` in the NTT domain, reduced
    #[inline]
    pub fn mul_vec(&self, v: &PolyVec<P, N, L>, out: &mut PolyVec<P, N, K>) {
        for (row, r) in self.0.iter().zip(out) {
            row.basemul_acc(v, r);
        }
    }
}

impl<P, const N: usize, const K: usize> PolyMat<P, N, K, K>
where
    P: Polynomial<N>,
{
    /// `out = self^T ∘ v` in the NTT domain, reduced
    #[inline]
    pub fn mul_vec_transposed(&self, v: &PolyVec<P, N, K>, out: &mut PolyVec<P, N, K>) {
        for (i, r) in out.into_iter().enumerate() {
            let mut column = self.0.iter().zip(v);
            if let Some((row, x)) = column.next() {
                row[i].pointwise(x, r);
            }
            for (row, x) in column {
                row[i].pointwise_acc(x, r);
            }
            r.reduce();
        }
    }
}

pub type KyberMatrix<const K: usize> = PolyMat<KyberPoly, { KyberPoly::N }, K, K>;

impl<const K: usize> KyberMatrix<K> {
    /// Expands the public seed into `A` with `A[i][j] = Parse(XOF(seed || j || i))`
    #[inline]
    pub fn expand(seed: &[u8; KYBER_SYMBYTES]) -> Self {
        let mut a = Self::default();
        for (i, row) in a.0.iter_mut().enumerate() {
            row.uniform_xof(seed, i as u8);
        }
        a
    }

    #[cfg(test)]
    pub(crate) fn transpose(&self) -> Self {
        let mut t = Self::default();
        for i in 0..K {
            for j in 0..K {
                t[j][i] = self[i][j];
            }
        }
        t
    }
}
