//! Scattering Geometry

use crate::common::*;
use crate::error::*;
use crate::expr::*;
use ordered_float::OrderedFloat;
use std::fmt;

/// Incidence and exit directions of one observation, angles in radians.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Geometry {
    /// Incident zenith angle.
    pub theta_0: Float,

    /// Exit zenith angle.
    pub theta_ex: Float,

    /// Incident azimuth angle.
    pub phi_0: Float,

    /// Exit azimuth angle.
    pub phi_ex: Float,
}

impl Geometry {
    /// Create a new bistatic `Geometry`.
    ///
    /// * `theta_0`  - Incident zenith angle.
    /// * `theta_ex` - Exit zenith angle.
    /// * `phi_0`    - Incident azimuth angle.
    /// * `phi_ex`   - Exit azimuth angle.
    pub fn new(theta_0: Float, theta_ex: Float, phi_0: Float, phi_ex: Float) -> Self {
        Self {
            theta_0,
            theta_ex,
            phi_0,
            phi_ex,
        }
    }

    /// Create a backscatter geometry where the exit direction points back to
    /// the source: `θex = θ0` and `φex = φ0 + π`.
    ///
    /// * `theta` - Zenith angle.
    /// * `phi`   - Incident azimuth angle.
    pub fn monostatic(theta: Float, phi: Float) -> Self {
        Self::new(theta, theta, phi, phi + PI)
    }

    /// Cosine of the incident zenith angle.
    pub fn mu_0(&self) -> Float {
        self.theta_0.cos()
    }

    /// Cosine of the exit zenith angle.
    pub fn mu_ex(&self) -> Float {
        self.theta_ex.cos()
    }

    /// Returns bindings for the four observation angles.
    pub fn bindings(&self) -> Bindings {
        Bindings::new()
            .with(Symbol::Theta0, self.theta_0)
            .with(Symbol::ThetaEx, self.theta_ex)
            .with(Symbol::Phi0, self.phi_0)
            .with(Symbol::PhiEx, self.phi_ex)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[theta_0: {}, theta_ex: {}, phi_0: {}, phi_ex: {}]",
            self.theta_0, self.theta_ex, self.phi_0, self.phi_ex
        )
    }
}

/// Coefficients `(a0, a1, a2)` of the generalized scattering angle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AngleParams(pub [Float; 3]);

impl AngleParams {
    /// Forward-peaked convention used by volume phase functions.
    pub const VOLUME: AngleParams = AngleParams([-1.0, 1.0, 1.0]);

    /// Specular convention used by surface BRDFs.
    pub const SURFACE: AngleParams = AngleParams([1.0, 1.0, 1.0]);

    /// Builds the coefficients from a user supplied list.
    ///
    /// * `a` - Exactly three finite values.
    pub fn from_slice(a: &[Float]) -> Result<Self> {
        match a {
            [a0, a1, a2] if a.iter().all(|v| v.is_finite()) => Ok(Self([*a0, *a1, *a2])),
            [_, _, _] => Err(Rt1Error::InvalidParameter(format!(
                "generalization parameters must be finite, got {a:?}"
            ))),
            _ => Err(Rt1Error::InvalidParameter(format!(
                "generalization parameter list must contain 3 values, got {}",
                a.len()
            ))),
        }
    }

    /// Returns a hashable key with exact value equality of the components;
    /// `-0.0` and `0.0` give the same key.
    pub fn key(&self) -> [OrderedFloat<Float>; 3] {
        self.0.map(OrderedFloat)
    }
}

impl Default for AngleParams {
    fn default() -> Self {
        Self::VOLUME
    }
}

impl fmt::Display for AngleParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.0[0], self.0[1], self.0[2])
    }
}

/// Cosine of the scattering angle between an incident and a scattered
/// direction given by zenith cosines and azimuths. Arguments outside
/// `[-1, 1]` yield NaN.
///
/// * `mu_i`  - Cosine of incidence zenith angle.
/// * `mu_s`  - Cosine of scattering zenith angle.
/// * `phi_i` - Incident azimuth angle.
/// * `phi_s` - Scattering azimuth angle.
pub fn cos_theta(mu_i: Float, mu_s: Float, phi_i: Float, phi_s: Float) -> Float {
    mu_i * mu_s + (1.0 - mu_i * mu_i).sqrt() * (1.0 - mu_s * mu_s).sqrt() * (phi_i - phi_s).cos()
}

/// Same as `cos_theta` with the sign of the zenith term flipped, converting
/// between incidence centered and backscatter centered conventions.
///
/// * `mu_i`  - Cosine of incidence zenith angle.
/// * `mu_s`  - Cosine of scattering zenith angle.
/// * `phi_i` - Incident azimuth angle.
/// * `phi_s` - Scattering azimuth angle.
pub fn cos_theta_prime(mu_i: Float, mu_s: Float, phi_i: Float, phi_s: Float) -> Float {
    -mu_i * mu_s + (1.0 - mu_i * mu_i).sqrt() * (1.0 - mu_s * mu_s).sqrt() * (phi_i - phi_s).cos()
}

/// Generalized scattering angle cosine
/// `a0 cosθ0 cosθex + a1 sinθ0 sinθex cosφ0 cosφex + a2 sinθ0 sinθex sinφ0 sinφex`.
/// Works on plain numbers and on symbolic expressions alike.
///
/// * `theta_0`  - First zenith angle.
/// * `theta_ex` - Second zenith angle.
/// * `phi_0`    - First azimuth angle.
/// * `phi_ex`   - Second azimuth angle.
/// * `a`        - Generalization coefficients.
pub fn scat_angle<T: Scalar>(
    theta_0: &T,
    theta_ex: &T,
    phi_0: &T,
    phi_ex: &T,
    a: &AngleParams,
) -> T {
    let [a0, a1, a2] = a.0;
    let sin_sin = theta_0.sin() * theta_ex.sin();
    (theta_0.cos() * theta_ex.cos()).scale(a0)
        + (sin_sin.clone() * phi_0.cos() * phi_ex.cos()).scale(a1)
        + (sin_sin * phi_0.sin() * phi_ex.sin()).scale(a2)
}

/// Checks that a zenith cosine lies in `(0, 1]`.
///
/// * `name` - Name used in the error message.
/// * `mu`   - The cosine.
pub fn validate_mu(name: &str, mu: Float) -> Result<Float> {
    if mu > 0.0 && mu <= 1.0 {
        Ok(mu)
    } else {
        Err(Rt1Error::Domain(format!("{name} must lie in (0, 1], got {mu}")))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn monostatic_geometry_points_back_to_source() {
        let g = Geometry::monostatic(0.4, 0.1);
        assert_eq!(g.theta_ex, 0.4);
        assert!(approx_eq!(f64, g.phi_ex, 0.1 + PI, ulps = 2));
        assert!(approx_eq!(f64, g.mu_0(), g.mu_ex(), ulps = 2));
    }

    #[test]
    fn angle_params_validate_length() {
        assert_eq!(AngleParams::from_slice(&[-1.0, 1.0, 1.0]), Ok(AngleParams::VOLUME));
        assert!(matches!(
            AngleParams::from_slice(&[1.0, 1.0]),
            Err(Rt1Error::InvalidParameter(_))
        ));
        assert!(matches!(
            AngleParams::from_slice(&[1.0, Float::NAN, 1.0]),
            Err(Rt1Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn angle_params_key_compares_values() {
        let a = AngleParams([-0.0, 1.0, 1.0]);
        let b = AngleParams([0.0, 1.0, 1.0]);
        assert_eq!(a.key(), b.key());
        assert_ne!(AngleParams::VOLUME.key(), AngleParams::SURFACE.key());
    }

    #[test]
    fn cos_theta_outside_domain_is_nan() {
        assert!(cos_theta(1.5, 0.5, 0.0, 0.0).is_nan());
    }

    #[test]
    fn cos_theta_prime_flips_zenith_term() {
        let (mi, ms, pi, ps) = (0.3, 0.8, 0.2, 1.3);
        let d = cos_theta(mi, ms, pi, ps) - cos_theta_prime(mi, ms, pi, ps);
        assert!(approx_eq!(f64, d, 2.0 * mi * ms, epsilon = 1e-12));
    }

    #[test]
    fn validate_mu_rejects_grazing_and_negative() {
        assert!(validate_mu("mu_0", 0.5).is_ok());
        assert!(validate_mu("mu_0", 1.0).is_ok());
        assert!(matches!(validate_mu("mu_0", 0.0), Err(Rt1Error::Domain(_))));
        assert!(matches!(validate_mu("mu_0", -0.2), Err(Rt1Error::Domain(_))));
    }

    #[test]
    fn symbolic_scat_angle_matches_numeric() {
        let a = AngleParams([-1.0, 0.5, 2.0]);
        let (t0, tex, p0, pex) = (0.3, 1.1, 0.7, 2.9);
        let numeric = scat_angle(&t0, &tex, &p0, &pex, &a);

        let symbolic = scat_angle(
            &Expr::symbol(Symbol::Theta0),
            &Expr::symbol(Symbol::ThetaEx),
            &Expr::symbol(Symbol::Phi0),
            &Expr::symbol(Symbol::PhiEx),
            &a,
        );
        let g = Geometry::new(t0, tex, p0, pex);
        assert!(approx_eq!(f64, symbolic.eval(&g.bindings()).unwrap(), numeric, epsilon = 1e-14));
    }

    #[test]
    fn fixed_angles_fold_to_constant() {
        let c = |v: Float| Expr::constant(v);
        let e = scat_angle(&c(0.3), &c(1.1), &c(0.7), &c(2.9), &AngleParams::SURFACE);
        let expected = scat_angle(&0.3, &1.1, &0.7, &2.9, &AngleParams::SURFACE);
        assert_eq!(e, Expr::Const(expected));
    }

    proptest! {
        #[test]
        fn cos_theta_with_equal_azimuths_drops_cosine_factor(
            mu_i in -1.0..1.0f64, mu_s in -1.0..1.0f64, phi in -10.0..10.0f64,
        ) {
            let expected = mu_i * mu_s + (1.0 - mu_i * mu_i).sqrt() * (1.0 - mu_s * mu_s).sqrt();
            let c = cos_theta(mu_i, mu_s, phi, phi);
            prop_assert!(approx_eq!(f64, c, expected, epsilon = 1e-12));
        }

        #[test]
        fn volume_scat_angle_of_backscatter_is_minus_one(
            theta in 0.0..1.5f64, phi in -3.0..3.0f64,
        ) {
            let g = Geometry::monostatic(theta, phi);
            let x = scat_angle(&g.theta_0, &g.theta_ex, &g.phi_0, &g.phi_ex, &AngleParams::VOLUME);
            prop_assert!(approx_eq!(f64, x, -1.0, epsilon = 1e-12));
        }
    }
}
