//! Henyey-Greenstein-Rayleigh

use super::*;
use rt1_core::common::*;
use rt1_core::error::*;
use rt1_core::expr::*;
use rt1_core::geometry::*;
use rt1_core::paramset::*;
use rt1_core::volume::*;
use std::sync::Arc;

/// Combined Henyey-Greenstein and Rayleigh phase function (Liu and Weng,
/// Appl. Opt. 45(28), 2006)
///
/// ```text
/// p(x) = 3/(8π) 1/(2 + t²) (1 + x²)(1 - t²) / (1 + t² - 2tx)^{3/2}
/// ```
#[derive(Clone, Debug)]
pub struct HgRayleigh {
    /// Albedo, optical depth and closed form description.
    data: VolumeData,

    /// The asymmetry parameter.
    t: Float,
}

impl HgRayleigh {
    /// Create a new `HgRayleigh` volume.
    ///
    /// * `omega`  - Single scattering albedo.
    /// * `tau`    - Optical depth.
    /// * `t`      - Asymmetry parameter in (-1, 1).
    /// * `ncoefs` - Number of Legendre terms retained (> 0).
    /// * `a`      - Generalized scattering angle parameters.
    pub fn new(omega: Float, tau: Float, t: Float, ncoefs: usize, a: AngleParams) -> Result<Self> {
        let t = validate_asymmetry(t)?;
        let x = ScatteringFunction::scat_angle_expr(&a);
        let k = 3.0 / (8.0 * PI) / (2.0 + t * t);
        let expression = k * (1.0 + x.clone().powf(2.0)) * (1.0 - t * t)
            / (1.0 + t * t - (2.0 * t) * x).powf(1.5);
        let sf = ScatteringFunction::new(
            expression,
            Arc::new(move |n| hg_rayleigh_legcoef(t, n)),
            ncoefs,
            a,
        )?;
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

impl_phase_function!(HgRayleigh);

impl TryFrom<&ParamSet> for HgRayleigh {
    type Error = Rt1Error;

    /// Create a `HgRayleigh` volume from parameters `omega`, `tau`, `t`,
    /// `ncoefs` and optional `a`.
    ///
    /// * `params` - The parameter set.
    fn try_from(params: &ParamSet) -> Result<Self> {
        let t = params.require_one_float("t")?;
        let ncoefs = params.require_ncoefs("ncoefs")?;
        let (omega, tau) = medium_params(params)?;
        Self::new(omega, tau, t, ncoefs, angle_params(params)?)
    }
}

/// Legendre coefficients of the Henyey-Greenstein-Rayleigh function. The
/// `tⁿ⁻²` term only exists for `n ≥ 2`.
///
/// * `t` - Asymmetry parameter.
/// * `n` - Polynomial index.
pub fn hg_rayleigh_legcoef(t: Float, n: usize) -> Float {
    let k = 3.0 / (8.0 * PI) / (2.0 + t * t);
    let nf = n as Float;
    let tn = t.powi(n as i32);
    let mut sum = (nf + 2.0) * (nf + 1.0) / (2.0 * nf + 3.0) * t.powi(n as i32 + 2)
        + (nf + 1.0).powi(2) / (2.0 * nf + 3.0) * tn
        + (5.0 * nf * nf - 1.0) / (2.0 * nf - 1.0) * tn;
    if n >= 2 {
        sum += nf * (nf - 1.0) / (2.0 * nf - 1.0) * t.powi(n as i32 - 2);
    }
    k * sum
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
