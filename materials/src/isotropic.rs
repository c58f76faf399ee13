//! Isotropic Surface

use rt1_core::common::*;
use rt1_core::error::*;
use rt1_core::geometry::*;
use rt1_core::legendre::*;
use rt1_core::surface::*;

/// Lambertian ground with the normalized BRDF `1/π`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Isotropic;

impl Isotropic {
    /// Create a new `Isotropic` surface.
    pub fn new() -> Self {
        Self
    }
}

impl Surface for Isotropic {
    fn brdf(&self, _cos_theta: Float) -> Float {
        INV_PI
    }

    fn ncoefs(&self) -> usize {
        1
    }

    fn legexpansion(&self, geometry: &Geometry, mode: GeometryMode) -> Result<Expansion> {
        let a = AngleParams::SURFACE;
        let series = surface_expansion(&isotropic_legcoef, 1, &a, geometry, mode)?;
        Ok(Expansion::from(series))
    }
}

/// Legendre coefficients `δ(n, 0) / π`.
///
/// * `n` - Polynomial index.
pub fn isotropic_legcoef(n: usize) -> Float {
    if n == 0 {
        INV_PI
    } else {
        0.0
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rt1_core::expr::*;

    #[test]
    fn expansion_is_constant() {
        let g = Geometry::new(0.3, 0.4, 0.0, 1.0);
        let e = Isotropic::new().legexpansion(&g, GeometryMode::FIXED).unwrap();
        let b = Bindings::new().with(Symbol::ThetaS, 0.2).with(Symbol::PhiS, 2.0);
        assert_eq!(e.eval(&b), Ok(INV_PI));
        assert_eq!(e.ncoefs(), 1);
    }

    proptest! {
        #[test]
        fn brdf_ignores_angle(x in -1.0..1.0f64) {
            prop_assert_eq!(Isotropic::new().brdf(x), INV_PI);
        }
    }
}
