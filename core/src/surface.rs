//! Surface Scattering

use crate::common::*;
use crate::error::*;
use crate::geometry::*;
use crate::legendre::*;
use std::sync::Arc;

/// Bidirectional reflectance of the ground below the volume.
pub trait Surface {
    /// Normalized BRDF as a function of the cosine of the generalized
    /// scattering angle.
    ///
    /// * `cos_theta` - Cosine of the scattering angle.
    fn brdf(&self, cos_theta: Float) -> Float;

    /// Number of Legendre terms of the expansion.
    fn ncoefs(&self) -> usize;

    /// Returns the Legendre expansion for the chosen evaluation geometry.
    ///
    /// * `geometry` - Values for the fixed angles.
    /// * `mode`     - Fixed/variable selection of the angles.
    fn legexpansion(&self, geometry: &Geometry, mode: GeometryMode) -> Result<Expansion>;
}

/// Atomic reference counted `Surface`.
pub type ArcSurface = Arc<dyn Surface + Send + Sync>;
