//! Exponential Integrals
//!
//! `Ei(x)` and the generalized `E_n(x)` needed by the interaction term. Both
//! report non-finite results and non-convergent series as
//! `NumericOverflow` instead of returning NaN or infinities.

use crate::common::*;
use crate::error::*;

/// Maximum number of series / continued fraction iterations.
const MAX_ITER: usize = 200;

/// Relative accuracy targeted by the iterations.
const EPS: Float = 1e-15;

/// Close to the smallest representable positive number.
const FP_MIN: Float = 1e-300;

/// Exponential integral `Ei(x) = -PV ∫_{-x}^{∞} e^{-t}/t dt`.
///
/// * `x` - Argument; `x = 0` diverges.
pub fn expi(x: Float) -> Result<Float> {
    if x.is_nan() {
        return Err(Rt1Error::Domain("Ei argument is NaN".into()));
    }
    if x == 0.0 {
        return Err(Rt1Error::NumericOverflow("Ei(0) diverges".into()));
    }
    if x < 0.0 {
        return Ok(-expn(1, -x)?);
    }

    let v = if x < FP_MIN {
        x.ln() + EULER_GAMMA
    } else if x <= -EPS.ln() {
        // Power series.
        let mut sum = 0.0;
        let mut fact = 1.0;
        let mut converged = false;
        for k in 1..=MAX_ITER {
            fact *= x / k as Float;
            let term = fact / k as Float;
            sum += term;
            if term < EPS * sum {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(Rt1Error::NumericOverflow(format!("Ei({x}) series did not converge")));
        }
        sum + x.ln() + EULER_GAMMA
    } else {
        // Asymptotic series, stopped at its smallest term.
        let mut sum = 0.0;
        let mut term = 1.0;
        for k in 1..=MAX_ITER {
            let prev = term;
            term *= k as Float / x;
            if term < EPS {
                break;
            }
            if term < prev {
                sum += term;
            } else {
                sum -= prev;
                break;
            }
        }
        x.exp() * (1.0 + sum) / x
    };

    finite("Ei", x, v)
}

/// Generalized exponential integral `E_n(x) = ∫₁^∞ e^{-xt}/t^n dt`.
///
/// * `n` - Order.
/// * `x` - Argument, `x ≥ 0` (`x > 0` for `n ≤ 1`).
pub fn expn(n: u32, x: Float) -> Result<Float> {
    if x.is_nan() || x < 0.0 {
        return Err(Rt1Error::Domain(format!("E_{n} needs a non-negative argument, got {x}")));
    }
    if x == 0.0 {
        return if n <= 1 {
            Err(Rt1Error::NumericOverflow(format!("E_{n}(0) diverges")))
        } else {
            Ok(1.0 / (n - 1) as Float)
        };
    }
    if n == 0 {
        return finite("E_0", x, (-x).exp() / x);
    }

    let nm1 = (n - 1) as Float;
    let v = if x > 1.0 {
        // Lentz's continued fraction.
        let mut b = x + n as Float;
        let mut c = 1.0 / FP_MIN;
        let mut d = 1.0 / b;
        let mut h = d;
        let mut converged = false;
        for i in 1..=MAX_ITER {
            let i = i as Float;
            let an = -i * (nm1 + i);
            b += 2.0;
            d = 1.0 / (an * d + b);
            c = b + an / c;
            let del = c * d;
            h *= del;
            if abs(del - 1.0) < EPS {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(Rt1Error::NumericOverflow(format!(
                "E_{n}({x}) continued fraction did not converge"
            )));
        }
        h * (-x).exp()
    } else {
        // Power series.
        let mut ans = if n > 1 { 1.0 / nm1 } else { -x.ln() - EULER_GAMMA };
        let mut fact = 1.0;
        let mut converged = false;
        for i in 1..=MAX_ITER {
            fact *= -x / i as Float;
            let del = if i as u32 != n - 1 {
                -fact / (i as Float - nm1)
            } else {
                let psi = -EULER_GAMMA + (1..n).map(|ii| 1.0 / ii as Float).sum::<Float>();
                fact * (-x.ln() + psi)
            };
            ans += del;
            if abs(del) < abs(ans) * EPS {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(Rt1Error::NumericOverflow(format!("E_{n}({x}) series did not converge")));
        }
        ans
    };

    finite("E_n", x, v)
}

fn finite(name: &str, x: Float, v: Float) -> Result<Float> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(Rt1Error::NumericOverflow(format!("{name}({x}) = {v}")))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
