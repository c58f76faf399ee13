//! Henyey-Greenstein

use super::*;
use rt1_core::common::*;
use rt1_core::error::*;
use rt1_core::expr::*;
use rt1_core::geometry::*;
use rt1_core::paramset::*;
use rt1_core::volume::*;
use std::sync::Arc;

/// Henyey-Greenstein phase function
/// `(1 - t²) / (4π (1 + t² - 2tx)^{3/2})`.
#[derive(Clone, Debug)]
pub struct HenyeyGreenstein {
    /// Albedo, optical depth and closed form description.
    data: VolumeData,

    /// The asymmetry parameter. Isotropic scattering uses t = 0.
    t: Float,
}

impl HenyeyGreenstein {
    /// Create a new `HenyeyGreenstein` volume.
    ///
    /// * `omega`  - Single scattering albedo.
    /// * `tau`    - Optical depth.
    /// * `t`      - Asymmetry parameter in (-1, 1).
    /// * `ncoefs` - Number of Legendre terms retained (> 0).
    /// * `a`      - Generalized scattering angle parameters.
    pub fn new(omega: Float, tau: Float, t: Float, ncoefs: usize, a: AngleParams) -> Result<Self> {
        let t = validate_asymmetry(t)?;
        let x = ScatteringFunction::scat_angle_expr(&a);
        let expression = (1.0 - t * t) / ((4.0 * PI) * (1.0 + t * t - (2.0 * t) * x).powf(1.5));
        let legcoefs = Arc::new(move |n| hg_legcoef(t, n));
        let sf = ScatteringFunction::new(expression, legcoefs, ncoefs, a)?;
        Ok(Self {
            data: VolumeData::new(omega, tau, sf)?,
            t,
        })
    }

    /// The asymmetry parameter.
    pub fn t(&self) -> Float {
        self.t
    }
}

impl_phase_function!(HenyeyGreenstein);

impl TryFrom<&ParamSet> for HenyeyGreenstein {
    type Error = Rt1Error;

    /// Create a `HenyeyGreenstein` volume from parameters `omega`, `tau`,
    /// `t`, `ncoefs` and optional `a`.
    ///
    /// * `params` - The parameter set.
    fn try_from(params: &ParamSet) -> Result<Self> {
        let t = params.require_one_float("t")?;
        let ncoefs = params.require_ncoefs("ncoefs")?;
        let (omega, tau) = medium_params(params)?;
        Self::new(omega, tau, t, ncoefs, angle_params(params)?)
    }
}

/// Legendre coefficients `(2n + 1) tⁿ / (4π)`.
///
/// * `t` - Asymmetry parameter.
/// * `n` - Polynomial index.
pub fn hg_legcoef(t: Float, n: usize) -> Float {
    (2.0 * n as Float + 1.0) * INV_FOUR_PI * t.powi(n as i32)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
