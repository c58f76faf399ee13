//! Surface-Volume Interaction
//!
//! The interaction contribution needs the coefficients `fn` of
//!
//! ```text
//! ∫₀^{2π} p(θ0, θs, φ0, φs) BRDF(θs, θex, φs, φex) dφs = Σ_n fn cos^n(θs)
//! ```
//!
//! and a truncated series of exponential integrals weighted by them.
//!
//! NOTE: The series is cut at a caller supplied `nmax`. There is no
//! convergence check beyond rejecting negative or fully cancelled sums, so
//! results are approximations whose accuracy depends on `nmax`.

use crate::common::*;
use crate::error::*;
use crate::expr::*;
use crate::geometry::*;
use crate::legendre::*;
use crate::special::*;
use crate::surface::*;
use crate::volume::*;

/// Largest relative mismatch tolerated between the `fn` series and the
/// directly evaluated integrand at `θs = 0` and `θs = π`.
pub const SERIES_TOLERANCE: Float = 1e-6;

/// Computes the `fn` coefficients for one fixed observation geometry by
/// multiplying the volume and surface Legendre expansions, integrating over
/// the azimuth of the intermediate direction and collecting powers of
/// `cos θs`.
///
/// The monomial basis loses precision quickly as the combined number of
/// Legendre terms grows: the `fn` alternate in sign and grow by orders of
/// magnitude while their sum stays of order one. For Henyey-Greenstein
/// volume and ground with equal `ncoefs`, `t ≈ 0.8` is usable up to roughly
/// 12 terms each, `t ≈ 0.6` up to roughly 20 and `t ≤ 0.4` to 30 and beyond;
/// the limit also shifts with the geometry. The series is checked against
/// the integrand at `θs = 0` and `θs = π`, where `|cos θs| = 1` and
/// cancellation is worst; a relative mismatch above `SERIES_TOLERANCE` is
/// reported as `NumericOverflow`.
///
/// * `volume`   - The volume.
/// * `surface`  - The surface.
/// * `geometry` - Incidence and exit angles.
pub fn fn_coefficients(
    volume: &dyn Volume,
    surface: &dyn Surface,
    geometry: &Geometry,
) -> Result<Vec<Float>> {
    let bindings = geometry.bindings();
    let ve = volume.legexpansion(geometry, GeometryMode::FIXED)?;
    let se = surface.legexpansion(geometry, GeometryMode::FIXED)?;
    let v = ve.to_polynomial(&bindings)?;
    let s = se.to_polynomial(&bindings)?;

    debug!(
        "fn coefficients for {geometry}: {} x {} Legendre terms, {} x {} monomials",
        volume.ncoefs(),
        surface.ncoefs(),
        v.len(),
        s.len()
    );
    let fn_ = (v * s).integrate_azimuth()?;

    // Direct values of 2π p BRDF at the poles, where the azimuth drops out.
    let mut reference = [0.0; 2];
    for (r, theta_s) in reference.iter_mut().zip([0.0, PI]) {
        let b = bindings.with(Symbol::ThetaS, theta_s).with(Symbol::PhiS, 0.0);
        *r = TWO_PI * ve.eval(&b)? * se.eval(&b)?;
    }
    let series = [
        fn_.iter().sum::<Float>(),
        fn_.iter().rev().fold(0.0, |acc, f| f - acc),
    ];
    let scale = reference[0].abs().max(reference[1].abs()).max(Float::MIN_POSITIVE);
    let mismatch = series
        .iter()
        .zip(reference.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, Float::max)
        / scale;
    if mismatch > SERIES_TOLERANCE {
        return Err(Rt1Error::NumericOverflow(format!(
            "fn series lost precision for {geometry}: relative error {mismatch:e} with {} \
             coefficients up to {:e}",
            fn_.len(),
            fn_.iter().fold(0.0, |m: Float, f| m.max(f.abs()))
        )));
    }
    Ok(fn_)
}

/// Returns the number of non-zero coefficients at index `nmax` or beyond
/// together with the largest of their magnitudes, or `None` when the
/// truncation drops nothing.
///
/// * `fn_`  - The `fn` coefficients.
/// * `nmax` - Number of series terms.
pub fn dropped_coefficients(fn_: &[Float], nmax: usize) -> Option<(usize, Float)> {
    let dropped = fn_.iter().skip(nmax).filter(|f| **f != 0.0);
    let (count, largest) = dropped.fold((0, 0.0), |(n, m): (usize, Float), f| {
        (n + 1, m.max(f.abs()))
    });
    if count > 0 {
        Some((count, largest))
    } else {
        None
    }
}

/// Evaluates the truncated interaction series
///
/// ```text
/// S    = Σ_{n<nmax} fn[n] μ1^(n+1) ( e^{-τ/μ1} ln(μ1/(1-μ1)) - Ei(-τ)
///                                   + e^{-τ/μ1} Ei(τ/μ1 - τ) + S2(n) )
/// S2(n) = Σ_{k=1}^{n+1} μ1^{-k} ( E_{k+1}(τ/μ1) - e^{-τ/μ1}/k )
/// ```
///
/// Coefficients beyond the end of `fn` count as zero. Non-zero coefficients
/// at index `nmax` or beyond are dropped with a warning; choose
/// `nmax ≥ fn.len()` for a truncation free result.
///
/// The integrand is non-negative for physical phase functions and BRDFs, so
/// a negative sum, or one that is smaller than the largest term by more than
/// the working precision, is reported as `NumericOverflow`.
///
/// * `mu1`  - Cosine of the first zenith angle, in `(0, 1)`.
/// * `mu2`  - Cosine of the second zenith angle, in `(0, 1]`. Only
///            validated; the closed form does not depend on it.
/// * `tau`  - Optical depth, `≥ 0`.
/// * `fn_`  - The `fn` coefficients.
/// * `nmax` - Number of series terms (> 0).
pub fn interaction_term(
    mu1: Float,
    mu2: Float,
    tau: Float,
    fn_: &[Float],
    nmax: usize,
) -> Result<Float> {
    if nmax == 0 {
        return Err(Rt1Error::InvalidTruncation("nmax must be positive".into()));
    }
    if !(mu1 > 0.0 && mu1 < 1.0) {
        return Err(Rt1Error::Domain(format!("mu1 must lie in (0, 1), got {mu1}")));
    }
    validate_mu("mu2", mu2)?;
    if !(tau >= 0.0 && tau.is_finite()) {
        return Err(Rt1Error::Domain(format!("tau must be non-negative, got {tau}")));
    }

    if let Some((count, largest)) = dropped_coefficients(fn_, nmax) {
        warn!(
            "nmax = {nmax} drops {count} of {} fn coefficients, largest |fn| = {largest:e}",
            fn_.len()
        );
    }

    let e = (-tau / mu1).exp();
    let hlp1 = e * (mu1 / (1.0 - mu1)).ln() - expi(-tau)? + e * expi(tau / mu1 - tau)?;

    let mut s = 0.0;
    let mut s2 = 0.0;
    let mut largest_term: Float = 0.0;
    for n in 0..nmax {
        // S2(n) = S2(n-1) + term for k = n+1
        let k = n + 1;
        s2 += mu1.powi(-(k as i32)) * (expn(k as u32 + 1, tau / mu1)? - e / k as Float);

        let f = fn_.get(n).copied().unwrap_or(0.0);
        let term = f * mu1.powi(k as i32) * (hlp1 + s2);
        trace!("interaction term n = {n}: fn = {f}, S2 = {s2}, term = {term}");
        s += term;
        largest_term = largest_term.max(term.abs());
    }

    if !s.is_finite() {
        return Err(Rt1Error::NumericOverflow(format!(
            "interaction series overflowed (mu1 = {mu1}, tau = {tau}, nmax = {nmax})"
        )));
    }
    if s < 0.0 || largest_term * Float::EPSILON > s.abs() {
        return Err(Rt1Error::NumericOverflow(format!(
            "interaction series cancelled to {s:e} with terms up to {largest_term:e} \
             (mu1 = {mu1}, tau = {tau}, nmax = {nmax})"
        )));
    }
    Ok(s)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn interaction_term_validates_inputs() {
        let f = [0.1, 0.2];
        let r = interaction_term(0.5, 0.5, 0.7, &f, 0);
        assert!(matches!(r, Err(Rt1Error::InvalidTruncation(_))));
        let bad = [(1.0, 0.5, 0.7), (0.0, 0.5, 0.7), (0.5, 0.0, 0.7), (0.5, 0.5, -0.1)];
        for (mu1, mu2, tau) in bad {
            let r = interaction_term(mu1, mu2, tau, &f, 2);
            assert!(matches!(r, Err(Rt1Error::Domain(_))), "{mu1}, {mu2}, {tau}");
        }
    }

    #[test]
    fn zero_optical_depth_overflows() {
        let r = interaction_term(0.5, 0.5, 0.0, &[1.0], 1);
        assert!(matches!(r, Err(Rt1Error::NumericOverflow(_))));
    }

    #[test]
    fn zero_coefficients_give_zero() {
        assert_eq!(interaction_term(0.4, 0.7, 0.5, &[0.0; 4], 4), Ok(0.0));
        assert_eq!(interaction_term(0.4, 0.7, 0.5, &[], 4), Ok(0.0));
    }

    #[test]
    fn single_term_matches_closed_form() {
        let (mu1, tau, f0): (f64, f64, f64) = (0.5, 0.7, 0.3);
        let e = (-tau / mu1).exp();
        let hlp1 = e * (mu1 / (1.0 - mu1)).ln() - expi(-tau).unwrap()
            + e * expi(tau / mu1 - tau).unwrap();
        let s2 = (expn(2, tau / mu1).unwrap() - e) / mu1;
        let expected = f0 * mu1 * (hlp1 + s2);

        let s = interaction_term(mu1, 0.5, tau, &[f0], 1).unwrap();
        assert!(approx_eq!(f64, s, expected, epsilon = 1e-14));
    }

    #[test]
    fn negative_or_cancelled_sum_is_overflow() {
        let r = interaction_term(0.5, 0.5, 0.7, &[-0.3], 1);
        assert!(matches!(r, Err(Rt1Error::NumericOverflow(_))));

        // μ1 = 0.5 keeps every power of μ1 exact, so the two terms cancel to 0
        let (mu1, tau) = (0.5, 0.7);
        let b0 = interaction_term(mu1, 0.5, tau, &[1.0], 1).unwrap();
        let b1 = interaction_term(mu1, 0.5, tau, &[0.0, 1.0], 2).unwrap();
        let r = interaction_term(mu1, 0.5, tau, &[b1, -b0], 2);
        assert!(matches!(r, Err(Rt1Error::NumericOverflow(_))), "{r:?}");
    }

    #[test]
    fn coefficients_beyond_nmax_are_ignored() {
        let a = interaction_term(0.6, 0.6, 0.4, &[0.2, 0.1, 0.05], 2).unwrap();
        let b = interaction_term(0.6, 0.6, 0.4, &[0.2, 0.1], 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn nmax_beyond_coefficients_zero_pads() {
        let a = interaction_term(0.6, 0.6, 0.4, &[0.2, 0.1], 2).unwrap();
        let b = interaction_term(0.6, 0.6, 0.4, &[0.2, 0.1], 6).unwrap();
        assert!(approx_eq!(f64, a, b, epsilon = 1e-14));
    }

    #[test]
    fn dropped_coefficients_are_counted() {
        let f = [0.2, 0.1, 0.05, -0.07, 0.0];
        assert_eq!(dropped_coefficients(&f, 2), Some((2, 0.07)));
        assert_eq!(dropped_coefficients(&f, 4), None);
        assert_eq!(dropped_coefficients(&f, 10), None);
        assert_eq!(dropped_coefficients(&[], 1), None);
    }
}
