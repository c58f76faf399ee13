//! Henyey-Greenstein Surface

use rt1_core::common::*;
use rt1_core::error::*;
use rt1_core::geometry::*;
use rt1_core::legendre::*;
use rt1_core::paramset::*;
use rt1_core::surface::*;

/// Henyey-Greenstein shaped BRDF
/// `(1 - t²) / (π (1 + t² - 2tx)^{3/2})` of the generalized scattering angle
/// cosine `x`, specular about the surface normal by default.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HenyeyGreensteinBrdf {
    /// Asymmetry parameter in (-1, 1).
    t: Float,

    /// Number of Legendre terms retained.
    ncoefs: usize,

    /// Generalized scattering angle parameters.
    a: AngleParams,
}

impl HenyeyGreensteinBrdf {
    /// Create a new `HenyeyGreensteinBrdf`.
    ///
    /// * `t`      - Asymmetry parameter in (-1, 1).
    /// * `ncoefs` - Number of Legendre terms retained (> 0).
    /// * `a`      - Generalized scattering angle parameters.
    pub fn new(t: Float, ncoefs: usize, a: AngleParams) -> Result<Self> {
        if !(t > -1.0 && t < 1.0) {
            return Err(Rt1Error::InvalidParameter(format!(
                "asymmetry parameter must lie in (-1, 1), got {t}"
            )));
        }
        if ncoefs == 0 {
            return Err(Rt1Error::InvalidParameter(
                "number of coefficients must be positive".into(),
            ));
        }
        Ok(Self { t, ncoefs, a })
    }

    /// Returns the Legendre coefficient `(2n + 1) tⁿ / π`.
    ///
    /// * `n` - Polynomial index.
    pub fn legcoef(&self, n: usize) -> Float {
        (2.0 * n as Float + 1.0) * INV_PI * self.t.powi(n as i32)
    }
}

impl Surface for HenyeyGreensteinBrdf {
    fn brdf(&self, cos_theta: Float) -> Float {
        let t = self.t;
        (1.0 - t * t) * INV_PI / (1.0 + t * t - 2.0 * t * cos_theta).powf(1.5)
    }

    fn ncoefs(&self) -> usize {
        self.ncoefs
    }

    fn legexpansion(&self, geometry: &Geometry, mode: GeometryMode) -> Result<Expansion> {
        let series = surface_expansion(&|n| self.legcoef(n), self.ncoefs, &self.a, geometry, mode)?;
        Ok(Expansion::from(series))
    }
}

impl TryFrom<&ParamSet> for HenyeyGreensteinBrdf {
    type Error = Rt1Error;

    /// Create a `HenyeyGreensteinBrdf` from parameters `t`, `ncoefs` and
    /// optional `a` (default `(1, 1, 1)`).
    ///
    /// * `params` - The parameter set.
    fn try_from(params: &ParamSet) -> Result<Self> {
        let t = params.require_one_float("t")?;
        let ncoefs = params.require_ncoefs("ncoefs")?;
        let a = match params.find_float("a") {
            Some(a) => AngleParams::from_slice(&a)?,
            None => AngleParams::SURFACE,
        };
        Self::new(t, ncoefs, a)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
