//! Legendre Expansions

use crate::common::*;
use crate::error::*;
use crate::expr::*;
use crate::geometry::*;
use crate::polynomial::*;
use std::fmt;
use std::ops::Add;
use std::sync::Arc;

mod geometry_mode;

// Re-export
pub use geometry_mode::*;

/// Closed form Legendre coefficient as a function of the polynomial index `n`.
pub type LegendreCoefficients = Arc<dyn Fn(usize) -> Float + Send + Sync>;

/// Returns the Legendre polynomial `P_n(x)` using the recurrence
/// `(k+1) P_{k+1} = (2k+1) x P_k - k P_{k-1}`.
///
/// * `n` - Degree.
/// * `x` - Argument.
pub fn legendre_p<T: Ring>(n: usize, x: T) -> T {
    let mut coefs = vec![0.0; n + 1];
    coefs[n] = 1.0;
    legendre_sum(&coefs, x)
}

/// Returns `Σ_n c_n P_n(x)`.
///
/// * `coefs` - Coefficients `c_n`.
/// * `x`     - Argument.
pub fn legendre_sum<T: Ring>(coefs: &[Float], x: T) -> T {
    let mut sum = T::constant(0.0);
    let mut p_prev = T::constant(1.0);
    let mut p = x.clone();
    for (n, c) in coefs.iter().enumerate() {
        let pn = match n {
            0 => T::constant(1.0),
            1 => x.clone(),
            _ => {
                let k = (n - 1) as Float;
                let next = (x.clone() * p.clone()).scale((2.0 * k + 1.0) / (k + 1.0))
                    - p_prev.clone().scale(k / (k + 1.0));
                p_prev = p;
                p = next;
                p.clone()
            }
        };
        if *c != 0.0 {
            sum = sum + pn.scale(*c);
        }
    }
    sum
}

/// Truncated series `Σ_{n<ncoefs} c_n P_n(x)` over a symbolic argument `x`.
/// The sum is kept unevaluated until `eval` or `to_polynomial` is called.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendreSeries {
    /// Coefficients `c_n`, `n = 0..ncoefs`.
    coefficients: Vec<Float>,

    /// The argument of the polynomials.
    argument: Expr,
}

impl LegendreSeries {
    /// Creates a new `LegendreSeries`.
    ///
    /// * `legcoefs` - Closed form coefficients.
    /// * `ncoefs`   - Number of terms retained.
    /// * `argument` - Argument of the Legendre polynomials.
    pub fn new(legcoefs: &dyn Fn(usize) -> Float, ncoefs: usize, argument: Expr) -> Result<Self> {
        if ncoefs == 0 {
            return Err(Rt1Error::InvalidTruncation(
                "number of Legendre coefficients must be positive".into(),
            ));
        }
        Ok(Self {
            coefficients: (0..ncoefs).map(legcoefs).collect(),
            argument,
        })
    }

    /// The argument of the Legendre polynomials.
    pub fn argument(&self) -> &Expr {
        &self.argument
    }

    /// Number of retained terms.
    pub fn ncoefs(&self) -> usize {
        self.coefficients.len()
    }

    /// Evaluates the series numerically.
    ///
    /// * `bindings` - Values for every symbol of the argument.
    pub fn eval(&self, bindings: &Bindings) -> Result<Float> {
        let x = self.argument.eval(bindings)?;
        Ok(legendre_sum(&self.coefficients, x))
    }

    /// Expands the series into a polynomial in the trig values of `θs` and
    /// `φs`.
    ///
    /// * `bindings` - Values for the remaining observation angles.
    pub fn to_polynomial(&self, bindings: &Bindings) -> Result<TrigPolynomial> {
        let x = TrigPolynomial::from_expr(&self.argument, bindings)?;
        Ok(legendre_sum(&self.coefficients, x))
    }
}

impl fmt::Display for LegendreSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sum(c_n*P_n({}), (n, 0, {}))", self.argument, self.ncoefs() - 1)
    }
}

/// A sum of Legendre series. Phase functions with different generalized
/// angle parameters do not share a Legendre basis, so a combination keeps
/// one series per parameter class.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Expansion {
    terms: Vec<LegendreSeries>,
}

impl Expansion {
    /// The individual series.
    pub fn terms(&self) -> &[LegendreSeries] {
        &self.terms
    }

    /// Largest number of retained terms among the series.
    pub fn ncoefs(&self) -> usize {
        self.terms.iter().map(|s| s.ncoefs()).max().unwrap_or(0)
    }

    /// Evaluates the sum of all series numerically.
    ///
    /// * `bindings` - Values for every symbol left in the series.
    pub fn eval(&self, bindings: &Bindings) -> Result<Float> {
        self.terms.iter().map(|s| s.eval(bindings)).sum()
    }

    /// Sum of the trig polynomial projections of all series.
    ///
    /// * `bindings` - Values for the remaining observation angles.
    pub fn to_polynomial(&self, bindings: &Bindings) -> Result<TrigPolynomial> {
        self.terms
            .iter()
            .try_fold(TrigPolynomial::zero(), |acc, s| Ok(acc + s.to_polynomial(bindings)?))
    }
}

impl From<LegendreSeries> for Expansion {
    fn from(series: LegendreSeries) -> Self {
        Self {
            terms: vec![series],
        }
    }
}

impl Add for Expansion {
    type Output = Expansion;

    fn add(mut self, rhs: Expansion) -> Expansion {
        self.terms.extend(rhs.terms);
        self
    }
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

/// Builds the Legendre expansion of a volume phase function,
/// `Σ c_n P_n(scat_angle(π - θ0, θs, φ0, φs, a))`. The `π - θ0` term turns the
/// zenith angle into the incidence angle of the backscatter convention.
///
/// * `legcoefs` - Closed form coefficients.
/// * `ncoefs`   - Number of terms retained.
/// * `a`        - Generalized angle parameters.
/// * `geometry` - Values used for the fixed slots.
/// * `mode`     - Fixed/variable selection of the four slots.
pub fn volume_expansion(
    legcoefs: &dyn Fn(usize) -> Float,
    ncoefs: usize,
    a: &AngleParams,
    geometry: &Geometry,
    mode: GeometryMode,
) -> Result<LegendreSeries> {
    let [theta_0, _, phi_0, _] = mode.slots(geometry);
    let theta_s = Expr::symbol(Symbol::ThetaS);
    let phi_s = Expr::symbol(Symbol::PhiS);
    let x = scat_angle(&(PI - theta_0), &theta_s, &phi_0, &phi_s, a);
    LegendreSeries::new(legcoefs, ncoefs, x)
}

/// Builds the Legendre expansion of a surface BRDF,
/// `Σ c_n P_n(scat_angle(θs, θex, φs, φex, a))`.
///
/// * `legcoefs` - Closed form coefficients.
/// * `ncoefs`   - Number of terms retained.
/// * `a`        - Generalized angle parameters.
/// * `geometry` - Values used for the fixed slots.
/// * `mode`     - Fixed/variable selection of the four slots.
pub fn surface_expansion(
    legcoefs: &dyn Fn(usize) -> Float,
    ncoefs: usize,
    a: &AngleParams,
    geometry: &Geometry,
    mode: GeometryMode,
) -> Result<LegendreSeries> {
    let [_, theta_ex, _, phi_ex] = mode.slots(geometry);
    let theta_s = Expr::symbol(Symbol::ThetaS);
    let phi_s = Expr::symbol(Symbol::PhiS);
    let x = scat_angle(&theta_s, &theta_ex, &phi_s, &phi_ex, a);
    LegendreSeries::new(legcoefs, ncoefs, x)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn hg(t: Float) -> impl Fn(usize) -> Float {
        move |n| (2.0 * n as Float + 1.0) * INV_FOUR_PI * t.powi(n as i32)
    }

    #[test]
    fn legendre_p_low_orders() {
        let x = 0.3;
        assert_eq!(legendre_p(0, x), 1.0);
        assert_eq!(legendre_p(1, x), x);
        assert!(approx_eq!(f64, legendre_p(2, x), 0.5 * (3.0 * x * x - 1.0), epsilon = 1e-15));
        assert!(approx_eq!(
            f64,
            legendre_p(3, x),
            0.5 * (5.0 * x * x * x - 3.0 * x),
            epsilon = 1e-15
        ));
        assert!(approx_eq!(
            f64,
            legendre_p(4, x),
            (35.0 * x.powi(4) - 30.0 * x * x + 3.0) / 8.0,
            epsilon = 1e-15
        ));
    }

    #[test]
    fn legendre_p_at_one_is_one() {
        for n in 0..30 {
            assert!(approx_eq!(f64, legendre_p(n, 1.0), 1.0, epsilon = 1e-12));
        }
    }

    #[test]
    fn zero_coefficients_is_invalid_truncation() {
        let r = LegendreSeries::new(&hg(0.2), 0, Expr::from(0.5));
        assert!(matches!(r, Err(Rt1Error::InvalidTruncation(_))));
    }

    #[test]
    fn fixed_expansion_keeps_only_scattering_symbols() {
        let g = Geometry::new(0.4, 0.6, 0.1, 2.0);
        let a = AngleParams::VOLUME;
        let s = volume_expansion(&hg(0.3), 8, &a, &g, GeometryMode::FIXED).unwrap();
        assert_eq!(s.argument().free_symbols(), vec![Symbol::ThetaS, Symbol::PhiS]);
        assert_eq!(s.ncoefs(), 8);
    }

    #[test]
    fn variable_expansion_evaluates_like_fixed_expansion() {
        let g = Geometry::new(0.4, 0.6, 0.1, 2.0);
        let a = AngleParams::VOLUME;
        let fixed = volume_expansion(&hg(0.3), 8, &a, &g, GeometryMode::FIXED).unwrap();
        let variable = volume_expansion(&hg(0.3), 8, &a, &g, GeometryMode::VARIABLE).unwrap();

        let b = g.bindings().with(Symbol::ThetaS, 0.9).with(Symbol::PhiS, 1.7);
        assert!(approx_eq!(
            f64,
            fixed.eval(&b).unwrap(),
            variable.eval(&b).unwrap(),
            epsilon = 1e-13
        ));
    }

    #[test]
    fn monostatic_expansion_ignores_exit_angles() {
        let c = hg(0.5);
        let g1 = Geometry::new(0.3, 1.2, 0.1, 0.4);
        let g2 = Geometry::new(0.3, 0.05, 0.1, -2.0);
        let mode = GeometryMode::Monostatic;
        let (sa, va) = (AngleParams::SURFACE, AngleParams::VOLUME);
        let e1 = surface_expansion(&c, 6, &sa, &g1, mode).unwrap();
        let e2 = surface_expansion(&c, 6, &sa, &g2, mode).unwrap();
        assert_eq!(e1, e2);

        let v1 = volume_expansion(&c, 6, &va, &g1, mode).unwrap();
        let v2 = volume_expansion(&c, 6, &va, &g2, mode).unwrap();
        assert_eq!(v1, v2);
    }

    #[test]
    fn polynomial_projection_matches_numeric_evaluation() {
        let g = Geometry::new(0.4, 0.6, 0.1, 2.0);
        let a = AngleParams::SURFACE;
        let s = surface_expansion(&hg(0.4), 7, &a, &g, GeometryMode::FIXED).unwrap();
        let p = s.to_polynomial(&g.bindings()).unwrap();

        let (ts, ps) = (1.1, -0.8);
        let b = g.bindings().with(Symbol::ThetaS, ts).with(Symbol::PhiS, ps);
        assert!(approx_eq!(f64, p.eval(ts, ps), s.eval(&b).unwrap(), epsilon = 1e-13));
    }

    #[test]
    fn expansion_sum_evaluates_to_sum_of_series() {
        let g = Geometry::new(0.4, 0.6, 0.1, 2.0);
        let mode = GeometryMode::FIXED;
        let a = volume_expansion(&hg(0.3), 5, &AngleParams::VOLUME, &g, mode).unwrap();
        let b = volume_expansion(&hg(-0.2), 9, &AngleParams([-0.5, 1.0, 1.0]), &g, mode).unwrap();
        let bind = Bindings::new().with(Symbol::ThetaS, 0.7).with(Symbol::PhiS, 0.2);
        let expected = a.eval(&bind).unwrap() + b.eval(&bind).unwrap();

        let sum = Expansion::from(a) + Expansion::from(b);
        assert_eq!(sum.terms().len(), 2);
        assert_eq!(sum.ncoefs(), 9);
        assert!(approx_eq!(f64, sum.eval(&bind).unwrap(), expected, ulps = 4));
    }
}
