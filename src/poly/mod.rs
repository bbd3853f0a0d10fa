use core::ops::{Add, AddAssign, Index, IndexMut, Sub, SubAssign};
use core::slice::{Iter, IterMut};

use zeroize::Zeroize;

use crate::field::*;

pub mod kyber;

pub trait Polynomial<const N: usize>:
    Index<usize, Output = Self::F>
    + IndexMut<usize, Output = Self::F>
    + AsRef<[Self::F; N]>
    + AsMut<[Self::F; N]>
    + Default
    + Sized
    + Clone
    + Copy
    + Zeroize
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
{
    type F: Field;

    const N: usize = N;

    /// Scale applied at the end of the inverse NTT
    const INV_NTT_SCALE: <Self::F as Field>::E;

    const NUM_SCALARS: usize =
        Self::N * core::mem::size_of::<Self::F>() / core::mem::size_of::<<Self::F as Field>::E>();

    fn zetas(k: usize) -> <Self::F as Field>::E;

    // Lessons learnt from benchmarking:
    // - Iterator::step_by is _VERY_ slow!
    // - Rust (checked) array indexing is slow. Use iterators where possible.

    /// In-place forward NTT (Cooley-Tukey butterflies), output in bit-reversed order.
    /// Every layer grows the coefficient bound by at most q.
    fn ntt(&mut self) {
        let mut k = 0;
        let mut len = Self::N / 2;
        while len > 0 {
            let len_times_two = len << 1;
            let mut start = 0;
            while start < Self::N {
                let zeta = Self::zetas(k);
                k += 1;
                let end = start + len_times_two;
                let (top, bottom) = self.as_mut()[start..end].split_at_mut(len);

                // u and v are len apart
                for (u, v) in top.iter_mut().zip(bottom) {
                    let t = *v * zeta;
                    *v = *u - t;
                    *u = *u + t;
                }
                start = end;
            }
            len >>= 1;
        }
    }

    /// In-place inverse NTT (Gentleman-Sande butterflies), multiplies by the Montgomery factor.
    fn inv_ntt(&mut self) {
        let mut k = Self::N - 1;
        let mut len = 1;
        while len < Self::N {
            let mut start = 0;
            let len_times_two = len << 1;
            while start < Self::N {
                k -= 1;
                let zeta = Self::zetas(k);
                let end = start + len_times_two;
                let (left, right) = self.as_mut()[start..end].split_at_mut(len);

                for (u, v) in left.iter_mut().zip(right) {
                    let t = *u;
                    *u = (t + *v).reduce();
                    *v = (*v - t) * zeta;
                }
                start = end;
            }
            len = len_times_two;
        }

        for f in self.as_mut() {
            *f *= Self::INV_NTT_SCALE;
        }
    }

    #[inline(always)]
    fn ntt_and_reduce(&mut self) {
        self.ntt();
        self.reduce();
    }

    /// Applies Barrett reduction to all coefficients of a polynomial
    #[inline]
    fn reduce(&mut self) {
        for f in self.as_mut() {
            *f = f.reduce();
        }
    }

    /// Maps all coefficients to `[0, q)`
    #[inline]
    fn freeze(&mut self) {
        for f in self.as_mut() {
            *f = f.freeze();
        }
    }

    /// Inplace conversion of all coefficients of a polynomial from normal domain to Montgomery domain
    #[inline]
    fn to_mont(&mut self) {
        for f in self.as_mut() {
            *f = f.to_mont();
        }
    }

    /// `result = self ∘ other` in the NTT domain
    fn pointwise(&self, other: &Self, result: &mut Self);

    /// `result += self ∘ other` in the NTT domain, no reduction
    fn pointwise_acc(&self, other: &Self, result: &mut Self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poly<T: Field, const N: usize>([T; N]);

impl<T: Field, const N: usize> Default for Poly<T, N> {
    #[inline(always)]
    fn default() -> Self {
        Poly([T::default(); N])
    }
}

impl<T: Field, const N: usize> Zeroize for Poly<T, N> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<'a, F: Field, const N: usize> IntoIterator for &'a Poly<F, N> {
    type Item = &'a F;
    type IntoIter = Iter<'a, F>;

    #[inline(always)]
    fn into_iter(self) -> Iter<'a, F> {
        self.0.iter()
    }
}

impl<'a, F: Field, const N: usize> IntoIterator for &'a mut Poly<F, N> {
    type Item = &'a mut F;
    type IntoIter = IterMut<'a, F>;

    #[inline(always)]
    fn into_iter(self) -> IterMut<'a, F> {
        self.0.iter_mut()
    }
}

impl<T: Field, const N: usize> Add<&Self> for Poly<T, N> {
    type Output = Self;

    #[inline(always)]
    fn add(mut self, rhs: &Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl<T: Field, const N: usize> Sub<&Self> for Poly<T, N> {
    type Output = Self;

    #[inline(always)]
    fn sub(mut self, rhs: &Self) -> Self::Output {
        self -= rhs;
        self
    }
}

/// Adds `rhs` polynomial to self; no modular reduction is performed.
impl<T: Field, const N: usize> AddAssign<&Self> for Poly<T, N> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += *b;
        }
    }
}

/// Subtracts `rhs` polynomial from self, i.e. `self` <- `self` - `rhs` ; no modular reduction is performed.
impl<T: Field, const N: usize> SubAssign<&Self> for Poly<T, N> {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: &Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a -= *b;
        }
    }
}

impl<T: Field, const N: usize> Index<usize> for Poly<T, N> {
    type Output = T;
    #[inline(always)]
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl<T: Field, const N: usize> IndexMut<usize> for Poly<T, N> {
    #[inline(always)]
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

impl<F: Field, const N: usize> AsRef<[F; N]> for Poly<F, N> {
    #[inline(always)]
    fn as_ref(&self) -> &[F; N] {
        &self.0
    }
}

impl<F: Field, const N: usize> AsMut<[F; N]> for Poly<F, N> {
    #[inline(always)]
    fn as_mut(&mut self) -> &mut [F; N] {
        &mut self.0
    }
}
