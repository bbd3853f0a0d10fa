use core::fmt::{Debug, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use zeroize::Zeroize;

use super::Field;

pub const KYBER_Q: i16 = 3_329;

pub(crate) const MONT: i16 = -1044; // 2^16 mod q

pub(crate) const QINV: i16 = -3327; // q^-1 mod 2^16

const MONT_SQUARED: i16 = 1353; // 2^32 mod q

/// Two adjacent coefficients `(a_{2i}, a_{2i+1})`.
///
/// The NTT of Kyber stops one level short, so in the NTT domain each pair is a
/// degree-1 polynomial modulo `X^2 - zeta`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Zeroize)]
pub struct KyberFq(pub [i16; 2]);

impl Debug for KyberFq {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{}, {}", self.0[0], self.0[1])
    }
}

impl AddAssign for KyberFq {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.0[0] += rhs.0[0];
        self.0[1] += rhs.0[1];
    }
}

impl SubAssign for KyberFq {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        self.0[0] -= rhs.0[0];
        self.0[1] -= rhs.0[1];
    }
}

impl Add for KyberFq {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self([self.0[0] + rhs.0[0], self.0[1] + rhs.0[1]])
    }
}

impl Sub for KyberFq {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self([self.0[0] - rhs.0[0], self.0[1] - rhs.0[1]])
    }
}

/// Montgomery multiplication of both coefficients by a scalar
impl Mul<i16> for KyberFq {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: i16) -> Self {
        Self([fqmul(self.0[0], rhs), fqmul(self.0[1], rhs)])
    }
}

impl MulAssign<i16> for KyberFq {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: i16) {
        self.0[0] = fqmul(self.0[0], rhs);
        self.0[1] = fqmul(self.0[1], rhs);
    }
}

/// Adds q if `x` is negative, without branching.
#[inline(always)]
pub(crate) const fn caddq(x: i16) -> i16 {
    x + ((x >> 15) & KYBER_Q)
}

impl KyberFq {
    /// Product in `Z_q[X]/(X^2 - zeta)`, scaled by 2^-16
    #[inline(always)]
    pub fn basemul(&self, other: Self, zeta: i16) -> Self {
        let (a0, a1) = (self.0[0], self.0[1]);
        let (b0, b1) = (other.0[0], other.0[1]);

        // using Karatsuba to reduce 5 fqmul operations to 4
        let z0 = fqmul(a0, b0);
        let z1 = fqmul(a1, b1);
        Self([fqmul(zeta, z1) + z0, fqmul(a1 + a0, b1 + b0) - z1 - z0])
    }

    #[inline(always)]
    pub fn basemul_acc(&self, other: Self, zeta: i16, r: &mut Self) {
        let (a0, a1) = (self.0[0], self.0[1]);
        let (b0, b1) = (other.0[0], other.0[1]);

        let z0 = fqmul(a0, b0);
        let z1 = fqmul(a1, b1);

        r.0[0] += fqmul(zeta, z1) + z0;
        r.0[1] += fqmul(a1 + a0, b1 + b0) - z1 - z0;
    }
}

const V: i16 = (((1 << 26) + (KYBER_Q / 2) as i32) / KYBER_Q as i32) as i16;

/// Centered representative of `a mod q`, for any `a: i16`
#[inline(always)]
pub(crate) fn barrett_reduce(a: i16) -> i16 {
    let a = a as i32;
    let t = ((V as i32 * a + (1 << 25)) >> 26) as i16;
    let r = (a - (t as i32 * KYBER_Q as i32)) as i16;

    debug_assert!(
        -KYBER_Q / 2 <= r && r <= KYBER_Q / 2,
        "barrett reduce of {} was {}",
        a,
        r
    );
    r
}

impl Field for KyberFq {
    type E = i16;

    const Q: Self::E = KYBER_Q;

    #[inline(always)]
    fn reduce(self) -> Self {
        Self([barrett_reduce(self.0[0]), barrett_reduce(self.0[1])])
    }

    #[inline(always)]
    fn caddq(self) -> Self {
        Self([caddq(self.0[0]), caddq(self.0[1])])
    }

    #[inline(always)]
    fn to_mont(self) -> Self {
        self * MONT_SQUARED
    }
}

#[inline(always)]
pub(crate) const fn montgomery_reduce(a: i32) -> i16 {
    let t = (a as i16).wrapping_mul(QINV);
    ((a - (t as i32) * (KYBER_Q as i32)) >> 16) as i16
}

/// Multiplication followed by Montgomery reduction
/// returns  a * b * MONT^{-1} mod KYBER_Q
#[inline(always)]
pub const fn fqmul(a: i16, b: i16) -> i16 {
    montgomery_reduce((a as i32) * (b as i32))
}
