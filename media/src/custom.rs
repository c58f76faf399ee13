//! User Defined Phase Function

use super::*;
use rt1_core::common::*;
use rt1_core::error::*;
use rt1_core::expr::*;
use rt1_core::geometry::*;
use rt1_core::legendre::*;
use rt1_core::volume::*;

/// A phase function given directly as an expression in `(θ0, θex, φ0, φex)`
/// together with its closed form Legendre coefficients. The pair is assumed
/// to describe the same normalized function; nothing checks it.
#[derive(Clone, Debug)]
pub struct CustomVolume {
    /// Albedo, optical depth and closed form description.
    data: VolumeData,
}

impl CustomVolume {
    /// Create a new `CustomVolume`.
    ///
    /// * `expression` - The phase function of the observation angles.
    /// * `legcoefs`   - Legendre coefficient as a function of `n`.
    /// * `ncoefs`     - Number of Legendre terms retained (> 0).
    /// * `a`          - Generalized scattering angle parameters.
    /// * `omega`      - Single scattering albedo.
    /// * `tau`        - Optical depth.
    pub fn new(
        expression: Expr,
        legcoefs: LegendreCoefficients,
        ncoefs: usize,
        a: AngleParams,
        omega: Float,
        tau: Float,
    ) -> Result<Self> {
        let sf = ScatteringFunction::new(expression, legcoefs, ncoefs, a)?;
        debug!("custom phase function {} with {ncoefs} coefficients", sf.expression);
        Ok(Self {
            data: VolumeData::new(omega, tau, sf)?,
        })
    }
}

impl_phase_function!(CustomVolume);

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
