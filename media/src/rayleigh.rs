//! Rayleigh

use super::*;
use rt1_core::common::*;
use rt1_core::error::*;
use rt1_core::expr::*;
use rt1_core::geometry::*;
use rt1_core::paramset::*;
use rt1_core::volume::*;
use std::sync::Arc;

/// Rayleigh scattering phase function `3/(16π) (1 + x²)` of the generalized
/// scattering angle cosine `x`.
#[derive(Clone, Debug)]
pub struct Rayleigh {
    /// Albedo, optical depth and closed form description.
    data: VolumeData,
}

impl Rayleigh {
    /// Three Legendre terms represent the function exactly.
    pub const NCOEFS: usize = 3;

    /// Create a new `Rayleigh` volume with the default generalized angle
    /// parameters `(-1, 1, 1)`.
    ///
    /// * `omega` - Single scattering albedo.
    /// * `tau`   - Optical depth.
    pub fn new(omega: Float, tau: Float) -> Result<Self> {
        Self::with_angle_params(omega, tau, AngleParams::VOLUME)
    }

    /// Create a new `Rayleigh` volume.
    ///
    /// * `omega` - Single scattering albedo.
    /// * `tau`   - Optical depth.
    /// * `a`     - Generalized scattering angle parameters.
    pub fn with_angle_params(omega: Float, tau: Float, a: AngleParams) -> Result<Self> {
        let x = ScatteringFunction::scat_angle_expr(&a);
        let expression = (3.0 / (16.0 * PI)) * (1.0 + x.powf(2.0));
        let sf = ScatteringFunction::new(expression, Arc::new(rayleigh_legcoef), Self::NCOEFS, a)?;
        Ok(Self {
            data: VolumeData::new(omega, tau, sf)?,
        })
    }
}

impl_phase_function!(Rayleigh);

impl TryFrom<&ParamSet> for Rayleigh {
    type Error = Rt1Error;

    /// Create a `Rayleigh` volume from parameters `omega`, `tau` and optional
    /// `a`.
    ///
    /// * `params` - The parameter set.
    fn try_from(params: &ParamSet) -> Result<Self> {
        let (omega, tau) = medium_params(params)?;
        Self::with_angle_params(omega, tau, angle_params(params)?)
    }
}

/// Legendre coefficients `3/(16π) (4/3 δ(n,0) + 2/3 δ(n,2))`.
///
/// * `n` - Polynomial index.
pub fn rayleigh_legcoef(n: usize) -> Float {
    let c = 3.0 / (16.0 * PI);
    match n {
        0 => c * 4.0 / 3.0,
        2 => c * 2.0 / 3.0,
        _ => 0.0,
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use rt1_core::legendre::*;

    #[test]
    fn legcoefs_are_nonzero_only_at_zero_and_two() {
        let v = Rayleigh::new(0.3, 0.7).unwrap();
        let c = 3.0 / (16.0 * PI);
        assert!(approx_eq!(f64, v.legcoef(0), c * 4.0 / 3.0, ulps = 2));
        assert_eq!(v.legcoef(1), 0.0);
        assert!(approx_eq!(f64, v.legcoef(2), c * 2.0 / 3.0, ulps = 2));
        for n in 3..20 {
            assert_eq!(v.legcoef(n), 0.0);
        }
        assert_eq!(v.ncoefs(), 3);
    }

    #[test]
    fn expansion_reproduces_phase_function() {
        let v = Rayleigh::new(0.3, 0.7).unwrap();
        let g = Geometry::new(0.2, 0.9, 0.4, 1.3);

        // the expansion is in the incidence angle π - θ0 and the scattering
        // direction (θs, φs); with θs = θex, φs = φex it is the phase function
        let e = v.legexpansion(&g, GeometryMode::FIXED).unwrap();
        let b = Bindings::new()
            .with(Symbol::ThetaS, g.theta_ex)
            .with(Symbol::PhiS, g.phi_ex);
        let a = AngleParams::VOLUME;
        let x = scat_angle(&(PI - g.theta_0), &g.theta_ex, &g.phi_0, &g.phi_ex, &a);
        let expected = 3.0 / (16.0 * PI) * (1.0 + x * x);
        assert!(approx_eq!(f64, e.eval(&b).unwrap(), expected, epsilon = 1e-14));
    }

    #[test]
    fn backscatter_value() {
        let v = Rayleigh::new(0.3, 0.7).unwrap();
        let p = v.p(&Geometry::monostatic(1.0, 0.0)).unwrap();
        assert!(approx_eq!(f64, p, 3.0 / (8.0 * PI), epsilon = 1e-14));
    }

    #[test]
    fn from_params_requires_medium() {
        let mut ps = ParamSet::new();
        ps.add_float("omega", &[0.3]);
        assert!(matches!(Rayleigh::try_from(&ps), Err(Rt1Error::MissingParameter(_))));

        ps.add_float("tau", &[0.7]);
        assert!(Rayleigh::try_from(&ps).is_ok());

        ps.add_float("a", &[1.0, 1.0]);
        assert!(matches!(Rayleigh::try_from(&ps), Err(Rt1Error::InvalidParameter(_))));
    }

    #[test]
    fn invalid_albedo_is_rejected() {
        assert!(matches!(Rayleigh::new(1.5, 0.7), Err(Rt1Error::InvalidParameter(_))));
    }
}
