//! Angle Sweeps

use crate::config::*;
use crate::rt1::*;
use itertools::iproduct;
use rt1_core::common::*;
use rt1_core::error::*;
use rt1_core::geometry::*;
use rt1_core::surface::*;
use rt1_core::volume::*;
use std::sync::Arc;

/// Evaluates the model for each geometry in turn. Per-sample evaluation
/// failures (`Domain`, `NumericOverflow`) are recorded as NaN rows and the
/// sweep continues; any other error aborts it.
///
/// * `config`     - Incident intensity and series truncation.
/// * `geometries` - The observation geometries.
/// * `volume`     - The scattering layer.
/// * `surface`    - The ground.
pub fn sweep(
    config: Rt1Config,
    geometries: &[Geometry],
    volume: &ArcVolume,
    surface: &ArcSurface,
) -> Result<Vec<RtResult>> {
    geometries
        .iter()
        .map(|g| {
            let model = Rt1::new(config, *g, Some(Arc::clone(volume)), Some(Arc::clone(surface)))?;
            match model.calc() {
                Ok(r) => Ok(r),
                Err(e) if e.is_recoverable() => {
                    warn!("{}: {e}; recording NaN", model.geometry());
                    Ok(RtResult::nan())
                }
                Err(e) => Err(e),
            }
        })
        .collect()
}

/// Backscatter sweep over incidence angles given in degrees, with
/// `θex = θ0`, `φ0 = 0` and `φex = π`.
///
/// * `config`  - Incident intensity and series truncation.
/// * `degrees` - Incidence zenith angles in degrees.
/// * `volume`  - The scattering layer.
/// * `surface` - The ground.
pub fn monostatic_sweep(
    config: Rt1Config,
    degrees: &[Float],
    volume: &ArcVolume,
    surface: &ArcSurface,
) -> Result<Vec<RtResult>> {
    let geometries: Vec<Geometry> = degrees
        .iter()
        .map(|d| Geometry::monostatic(d.to_radians(), 0.0))
        .collect();
    sweep(config, &geometries, volume, surface)
}

/// Sweep over every pair of incidence and exit zenith angles (degrees) at a
/// fixed relative azimuth. Rows are ordered by incidence angle first.
///
/// * `config`     - Incident intensity and series truncation.
/// * `inc`        - Incidence zenith angles in degrees.
/// * `ex`         - Exit zenith angles in degrees.
/// * `phi_ex`     - Exit azimuth in radians; the incident azimuth is 0.
/// * `volume`     - The scattering layer.
/// * `surface`    - The ground.
pub fn bistatic_sweep(
    config: Rt1Config,
    inc: &[Float],
    ex: &[Float],
    phi_ex: Float,
    volume: &ArcVolume,
    surface: &ArcSurface,
) -> Result<Vec<RtResult>> {
    let geometries: Vec<Geometry> = iproduct!(inc.iter(), ex.iter())
        .map(|(t0, tex)| Geometry::new(t0.to_radians(), tex.to_radians(), 0.0, phi_ex))
        .collect();
    debug!("bistatic sweep over {} geometries", geometries.len());
    sweep(config, &geometries, volume, surface)
}
