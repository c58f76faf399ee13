//! Shared Volume Data

use rt1_core::common::*;
use rt1_core::error::*;
use rt1_core::geometry::*;
use rt1_core::legendre::*;
use rt1_core::paramset::*;
use rt1_core::volume::*;

/// Albedo, optical depth and closed form description of a phase function.
#[derive(Clone, Debug)]
pub struct VolumeData {
    /// Single scattering albedo `ω`.
    pub omega: Float,

    /// Optical depth `τ`.
    pub tau: Float,

    /// Expression and Legendre coefficients.
    pub sf: ScatteringFunction,
}

impl VolumeData {
    /// Validates the medium parameters and creates a new `VolumeData`.
    ///
    /// * `omega` - Single scattering albedo.
    /// * `tau`   - Optical depth.
    /// * `sf`    - Expression and Legendre coefficients.
    pub fn new(omega: Float, tau: Float, sf: ScatteringFunction) -> Result<Self> {
        validate_medium(omega, tau)?;
        Ok(Self { omega, tau, sf })
    }

    /// Returns the single Legendre series of the phase function.
    ///
    /// * `geometry` - Values for the fixed angles.
    /// * `mode`     - Fixed/variable selection of the angles.
    pub fn legexpansion(&self, geometry: &Geometry, mode: GeometryMode) -> Result<Expansion> {
        let sf = &self.sf;
        let series = volume_expansion(&*sf.legcoefs, sf.ncoefs, &sf.a, geometry, mode)?;
        Ok(Expansion::from(series))
    }
}

/// Reads `omega` and `tau` from a parameter set. Both are required.
///
/// * `params` - The parameter set.
pub fn medium_params(params: &ParamSet) -> Result<(Float, Float)> {
    Ok((params.require_one_float("omega")?, params.require_one_float("tau")?))
}

/// Reads the generalized angle parameters `a`, defaulting to the volume
/// convention.
///
/// * `params` - The parameter set.
pub fn angle_params(params: &ParamSet) -> Result<AngleParams> {
    match params.find_float("a") {
        Some(a) => AngleParams::from_slice(&a),
        None => Ok(AngleParams::VOLUME),
    }
}

/// Checks the asymmetry parameter of Henyey-Greenstein type functions.
///
/// * `t` - Must lie in `(-1, 1)`.
pub fn validate_asymmetry(t: Float) -> Result<Float> {
    if t > -1.0 && t < 1.0 {
        Ok(t)
    } else {
        Err(Rt1Error::InvalidParameter(format!(
            "asymmetry parameter must lie in (-1, 1), got {t}"
        )))
    }
}
