//! Volume Scattering

use crate::common::*;
use crate::error::*;
use crate::expr::*;
use crate::geometry::*;
use crate::legendre::*;
use std::fmt;
use std::sync::Arc;

/// Closed form description shared by phase functions and BRDFs: the
/// normalized function as an expression in `(θ0, θex, φ0, φex)` and its
/// Legendre coefficients.
#[derive(Clone)]
pub struct ScatteringFunction {
    /// The function in terms of the four observation angles.
    pub expression: Expr,

    /// Legendre coefficient as a function of the index `n`.
    pub legcoefs: LegendreCoefficients,

    /// Number of Legendre terms retained.
    pub ncoefs: usize,

    /// Generalized scattering angle parameters.
    pub a: AngleParams,
}

impl ScatteringFunction {
    /// Creates a new `ScatteringFunction`.
    ///
    /// * `expression` - The function of the observation angles.
    /// * `legcoefs`   - Closed form Legendre coefficients.
    /// * `ncoefs`     - Number of Legendre terms retained (> 0).
    /// * `a`          - Generalized scattering angle parameters.
    pub fn new(
        expression: Expr,
        legcoefs: LegendreCoefficients,
        ncoefs: usize,
        a: AngleParams,
    ) -> Result<Self> {
        if ncoefs == 0 {
            return Err(Rt1Error::InvalidParameter(
                "number of coefficients must be positive".into(),
            ));
        }
        Ok(Self {
            expression,
            legcoefs,
            ncoefs,
            a,
        })
    }

    /// Returns the Legendre coefficient for index `n`.
    ///
    /// * `n` - Polynomial index.
    pub fn legcoef(&self, n: usize) -> Float {
        (self.legcoefs)(n)
    }

    /// Returns the scattering angle expression in the observation angles.
    pub fn scat_angle_expr(a: &AngleParams) -> Expr {
        scat_angle(
            &Expr::symbol(Symbol::Theta0),
            &Expr::symbol(Symbol::ThetaEx),
            &Expr::symbol(Symbol::Phi0),
            &Expr::symbol(Symbol::PhiEx),
            a,
        )
    }
}

impl fmt::Debug for ScatteringFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScatteringFunction")
            .field("expression", &self.expression)
            .field("ncoefs", &self.ncoefs)
            .field("a", &self.a)
            .finish()
    }
}

/// A scattering medium as seen by the RT1 model: albedo, optical depth, a
/// numeric phase function and a Legendre expansion for any evaluation
/// geometry.
pub trait Volume {
    /// Single scattering albedo `ω`.
    fn omega(&self) -> Float;

    /// Optical depth `τ`.
    fn tau(&self) -> Float;

    /// The normalized phase function in terms of `(θ0, θex, φ0, φex)`.
    fn expression(&self) -> &Expr;

    /// Number of Legendre terms of the expansion.
    fn ncoefs(&self) -> usize;

    /// Returns the Legendre expansion for the chosen evaluation geometry.
    ///
    /// * `geometry` - Values for the fixed angles.
    /// * `mode`     - Fixed/variable selection of the angles.
    fn legexpansion(&self, geometry: &Geometry, mode: GeometryMode) -> Result<Expansion>;

    /// Evaluates the phase function numerically.
    ///
    /// * `geometry` - Incidence and exit angles.
    fn p(&self, geometry: &Geometry) -> Result<Float> {
        self.expression().eval(&geometry.bindings())
    }
}

/// A volume that also advertises a coherent set of per-index Legendre
/// coefficients. Linear combinations across different generalized angle
/// parameters are only a `Volume`.
pub trait PhaseFunction: Volume {
    /// The closed form description.
    fn scattering_function(&self) -> &ScatteringFunction;

    /// Returns the Legendre coefficient for index `n`.
    ///
    /// * `n` - Polynomial index.
    fn legcoef(&self, n: usize) -> Float {
        self.scattering_function().legcoef(n)
    }

    /// Generalized scattering angle parameters.
    fn angle_params(&self) -> AngleParams {
        self.scattering_function().a
    }
}

/// Atomic reference counted `Volume`.
pub type ArcVolume = Arc<dyn Volume + Send + Sync>;

/// Atomic reference counted `PhaseFunction`.
pub type ArcPhaseFunction = Arc<dyn PhaseFunction + Send + Sync>;

/// Checks the single scattering albedo and the optical depth.
///
/// * `omega` - Must lie in `[0, 1]`.
/// * `tau`   - Must be `≥ 0`.
pub fn validate_medium(omega: Float, tau: Float) -> Result<()> {
    if !(0.0..=1.0).contains(&omega) {
        return Err(Rt1Error::InvalidParameter(format!(
            "single scattering albedo must lie in [0, 1], got {omega}"
        )));
    }
    if !(tau >= 0.0 && tau.is_finite()) {
        return Err(Rt1Error::InvalidParameter(format!(
            "optical depth must be non-negative, got {tau}"
        )));
    }
    Ok(())
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scattering_function_requires_coefficients() {
        let r = ScatteringFunction::new(
            Expr::from(INV_FOUR_PI),
            Arc::new(|n| if n == 0 { INV_FOUR_PI } else { 0.0 }),
            0,
            AngleParams::VOLUME,
        );
        assert!(matches!(r, Err(Rt1Error::InvalidParameter(_))));
    }

    #[test]
    fn validate_medium_bounds() {
        assert!(validate_medium(0.0, 0.0).is_ok());
        assert!(validate_medium(1.0, 3.0).is_ok());
        assert!(matches!(validate_medium(1.2, 0.1), Err(Rt1Error::InvalidParameter(_))));
        assert!(matches!(validate_medium(0.3, -0.1), Err(Rt1Error::InvalidParameter(_))));
        assert!(matches!(validate_medium(0.3, Float::NAN), Err(Rt1Error::InvalidParameter(_))));
    }
}
