//! Common math shared by all crates.

use num_traits::Num;
use std::ops::Neg;

/// Use 64-bit precision for floating point numbers. The exponential
/// integrals in the interaction term lose too much in 32-bit.
pub type Float = f64;

/// PI (π)
pub const PI: Float = std::f64::consts::PI;

/// 1/PI (1/π)
pub const INV_PI: Float = 1.0 / PI;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// 4*PI (4π)
pub const FOUR_PI: Float = PI * 4.0;

/// 1/4*PI (1/4π)
pub const INV_FOUR_PI: Float = 1.0 / FOUR_PI;

/// Euler–Mascheroni constant (γ).
pub const EULER_GAMMA: Float = 0.577_215_664_901_532_9;

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns `true` if `a` and `b` differ by no more than `tol`.
///
/// * `a`   - First number.
/// * `b`   - Second number.
/// * `tol` - Absolute tolerance.
#[inline(always)]
pub fn almost_equal(a: Float, b: Float, tol: Float) -> bool {
    abs(a - b) <= tol
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
