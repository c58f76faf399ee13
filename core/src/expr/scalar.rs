//! Numeric-like values accepted by the expression builders.

use super::Expr;
use crate::common::*;
use std::ops::{Add, Mul, Neg, Sub};

/// A commutative ring with real constants. This is enough to run the
/// Legendre recurrence.
pub trait Ring:
    Clone + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    /// Embeds a real constant.
    ///
    /// * `v` - The value.
    fn constant(v: Float) -> Self;

    /// Multiplies by a real constant.
    ///
    /// * `k` - The factor.
    fn scale(self, k: Float) -> Self {
        Self::constant(k) * self
    }
}

/// A ring that also has `cos` and `sin`. Needed to build the scattering angle
/// from zenith and azimuth angles.
pub trait Scalar: Ring {
    /// Returns the cosine.
    fn cos(&self) -> Self;

    /// Returns the sine.
    fn sin(&self) -> Self;
}

impl Ring for Float {
    #[inline(always)]
    fn constant(v: Float) -> Self {
        v
    }

    #[inline(always)]
    fn scale(self, k: Float) -> Self {
        k * self
    }
}

impl Scalar for Float {
    #[inline(always)]
    fn cos(&self) -> Self {
        Float::cos(*self)
    }

    #[inline(always)]
    fn sin(&self) -> Self {
        Float::sin(*self)
    }
}

impl Ring for Expr {
    fn constant(v: Float) -> Self {
        Expr::Const(v)
    }
}

impl Scalar for Expr {
    fn cos(&self) -> Self {
        Expr::cos(self.clone())
    }

    fn sin(&self) -> Self {
        Expr::sin(self.clone())
    }
}
