//! Trigonometric Polynomials
//!
//! Polynomials in `cos θs`, `sin θs`, `cos φs` and `sin φs` with real
//! coefficients. Once all observation angles are fixed, a Legendre expansion
//! projects onto this form, which can be integrated over `φs` exactly.

use crate::common::*;
use crate::error::*;
use crate::expr::*;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// The four polynomial variables.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrigVar {
    CosThetaS = 0,
    SinThetaS = 1,
    CosPhiS = 2,
    SinPhiS = 3,
}

/// Exponents of `(cos θs, sin θs, cos φs, sin φs)`.
type Monomial = [u32; 4];

/// Sparse polynomial in the trig values of the scattering direction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrigPolynomial {
    terms: BTreeMap<Monomial, Float>,
}

impl TrigPolynomial {
    /// Returns the zero polynomial.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns the polynomial consisting of a single variable.
    ///
    /// * `var` - The variable.
    pub fn var(var: TrigVar) -> Self {
        let mut m = [0; 4];
        m[var as usize] = 1;
        Self {
            terms: BTreeMap::from([(m, 1.0)]),
        }
    }

    /// Number of stored monomials.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` for the zero polynomial.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the coefficient of a monomial.
    ///
    /// * `exponents` - Exponents of `(cos θs, sin θs, cos φs, sin φs)`.
    pub fn coefficient(&self, exponents: [u32; 4]) -> Float {
        self.terms.get(&exponents).copied().unwrap_or(0.0)
    }

    /// Raises the polynomial to a non-negative integer power.
    ///
    /// * `n` - The exponent.
    pub fn powi(&self, n: u32) -> Self {
        (0..n).fold(Self::constant(1.0), |acc, _| acc * self.clone())
    }

    /// Evaluates the polynomial for a scattering direction.
    ///
    /// * `theta_s` - Zenith angle.
    /// * `phi_s`   - Azimuth angle.
    pub fn eval(&self, theta_s: Float, phi_s: Float) -> Float {
        let v = [theta_s.cos(), theta_s.sin(), phi_s.cos(), phi_s.sin()];
        self.terms
            .iter()
            .map(|(m, c)| {
                c * m
                    .iter()
                    .zip(v.iter())
                    .map(|(e, x)| x.powi(*e as i32))
                    .product::<Float>()
            })
            .sum()
    }

    /// Projects an expression onto a trig polynomial. Sub-expressions that do
    /// not involve `θs` or `φs` are evaluated with `bindings`; `θs` and `φs`
    /// may only appear directly inside `cos` or `sin`, combined by sums,
    /// products, divisions by constants and non-negative integer powers.
    ///
    /// * `expr`     - The expression.
    /// * `bindings` - Values for the observation angles.
    pub fn from_expr(expr: &Expr, bindings: &Bindings) -> Result<Self> {
        if !expr.depends_on(Symbol::ThetaS) && !expr.depends_on(Symbol::PhiS) {
            return Ok(Self::constant(expr.eval(bindings)?));
        }

        match expr {
            Expr::Cos(arg) => match arg.as_ref() {
                Expr::Symbol(Symbol::ThetaS) => Ok(Self::var(TrigVar::CosThetaS)),
                Expr::Symbol(Symbol::PhiS) => Ok(Self::var(TrigVar::CosPhiS)),
                _ => Err(not_polynomial(expr)),
            },
            Expr::Sin(arg) => match arg.as_ref() {
                Expr::Symbol(Symbol::ThetaS) => Ok(Self::var(TrigVar::SinThetaS)),
                Expr::Symbol(Symbol::PhiS) => Ok(Self::var(TrigVar::SinPhiS)),
                _ => Err(not_polynomial(expr)),
            },
            Expr::Add(a, b) => Ok(Self::from_expr(a, bindings)? + Self::from_expr(b, bindings)?),
            Expr::Mul(a, b) => Ok(Self::from_expr(a, bindings)? * Self::from_expr(b, bindings)?),
            Expr::Neg(a) => Ok(-Self::from_expr(a, bindings)?),
            Expr::Div(a, b) if !b.depends_on(Symbol::ThetaS) && !b.depends_on(Symbol::PhiS) => {
                let d = b.eval(bindings)?;
                Ok(Self::from_expr(a, bindings)?.scale(1.0 / d))
            }
            Expr::Pow(a, p) if *p >= 0.0 && p.fract() == 0.0 => {
                Ok(Self::from_expr(a, bindings)?.powi(*p as u32))
            }
            _ => Err(not_polynomial(expr)),
        }
    }

    /// Integrates over `φs ∈ [0, 2π]` and rewrites even powers of `sin θs`
    /// as `(1 - cos²θs)^k`. Returns the coefficients of `cos^n θs`, index `n`.
    pub fn integrate_azimuth(&self) -> Result<Vec<Float>> {
        let mut coefs: Vec<Float> = Vec::new();
        for ([px, py, pc, ps], c) in self.terms.iter() {
            let w = azimuth_moment(*pc, *ps);
            if w == 0.0 || *c == 0.0 {
                continue;
            }
            if py % 2 == 1 {
                return Err(Rt1Error::InvalidParameter(format!(
                    "odd power {py} of sin(theta_s) survives the azimuth integration"
                )));
            }

            // sin^(2m) = (1 - cos^2)^m
            let m = py / 2;
            let mut binom = 1.0;
            for k in 0..=m {
                let n = (*px + 2 * k) as usize;
                if coefs.len() <= n {
                    coefs.resize(n + 1, 0.0);
                }
                let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                coefs[n] += sign * binom * w * c;
                binom = binom * (m - k) as Float / (k + 1) as Float;
            }
        }
        Ok(coefs)
    }
}

/// Returns `∫₀^{2π} cos^i(φ) sin^j(φ) dφ`.
///
/// * `i` - Power of the cosine.
/// * `j` - Power of the sine.
pub fn azimuth_moment(i: u32, j: u32) -> Float {
    if i % 2 == 1 || j % 2 == 1 {
        return 0.0;
    }

    // 2π (i-1)!! (j-1)!! / (i+j)!!
    let double_factorial = |n: i64| -> Float {
        let mut r = 1.0;
        let mut k = n;
        while k > 1 {
            r *= k as Float;
            k -= 2;
        }
        r
    };
    let (i, j) = (i as i64, j as i64);
    TWO_PI * double_factorial(i - 1) * double_factorial(j - 1) / double_factorial(i + j)
}

fn not_polynomial(expr: &Expr) -> Rt1Error {
    Rt1Error::InvalidParameter(format!(
        "expression is not polynomial in the trig values of theta_s and phi_s: {expr}"
    ))
}

impl Ring for TrigPolynomial {
    fn constant(v: Float) -> Self {
        let mut terms = BTreeMap::new();
        if v != 0.0 {
            terms.insert([0; 4], v);
        }
        Self { terms }
    }

    fn scale(mut self, k: Float) -> Self {
        self.terms.values_mut().for_each(|c| *c *= k);
        self
    }
}

impl Add for TrigPolynomial {
    type Output = TrigPolynomial;

    fn add(mut self, rhs: TrigPolynomial) -> TrigPolynomial {
        for (m, c) in rhs.terms {
            *self.terms.entry(m).or_insert(0.0) += c;
        }
        self
    }
}

impl Sub for TrigPolynomial {
    type Output = TrigPolynomial;

    fn sub(self, rhs: TrigPolynomial) -> TrigPolynomial {
        self + (-rhs)
    }
}

impl Neg for TrigPolynomial {
    type Output = TrigPolynomial;

    fn neg(self) -> TrigPolynomial {
        self.scale(-1.0)
    }
}

impl Mul for TrigPolynomial {
    type Output = TrigPolynomial;

    fn mul(self, rhs: TrigPolynomial) -> TrigPolynomial {
        let mut terms: BTreeMap<Monomial, Float> = BTreeMap::new();
        for (ma, ca) in self.terms.iter() {
            for (mb, cb) in rhs.terms.iter() {
                let m = [ma[0] + mb[0], ma[1] + mb[1], ma[2] + mb[2], ma[3] + mb[3]];
                *terms.entry(m).or_insert(0.0) += ca * cb;
            }
        }
        TrigPolynomial { terms }
    }
}

impl fmt::Display for TrigPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        let names = ["cos(theta_s)", "sin(theta_s)", "cos(phi_s)", "sin(phi_s)"];
        for (i, (m, c)) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{c}")?;
            for (e, name) in m.iter().zip(names.iter()) {
                match e {
                    0 => {}
                    1 => write!(f, "*{name}")?,
                    _ => write!(f, "*{name}**{e}")?,
                }
            }
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
