use core::fmt::Debug;
use core::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use zeroize::Zeroize;

pub mod kyber;

/// Element (or packed group of elements) of a prime field with lazy reduction.
pub trait Field:
    Sized
    + Copy
    + Default
    + Debug
    + PartialEq
    + Zeroize
    + Mul<Self::E, Output = Self>
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + AddAssign<Self>
    + SubAssign<Self>
    + MulAssign<Self::E>
{
    type E: Copy + Debug;

    const Q: Self::E;

    /// Reduce to the centered representative in `[-(q-1)/2, (q-1)/2]`
    fn reduce(self) -> Self;

    /// Map a representative in `(-q, q)` to `[0, q)`
    fn caddq(self) -> Self;

    /// Multiply by the Montgomery factor 2^16
    fn to_mont(self) -> Self;

    /// Canonical representative in `[0, q)` of any lazily reduced value
    #[inline(always)]
    fn freeze(self) -> Self {
        self.reduce().caddq()
    }
}
