//! First Order Radiative Transfer

use crate::config::*;
use rt1_core::common::*;
use rt1_core::error::*;
use rt1_core::geometry::*;
use rt1_core::interaction::*;
use rt1_core::surface::*;
use rt1_core::volume::*;
use std::fmt;

/// The contributions to the backscattered intensity for one geometry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RtResult {
    /// Sum of the three contributions.
    pub total: Float,

    /// Attenuated surface reflection.
    pub surface: Float,

    /// Single scattering inside the volume.
    pub volume: Float,

    /// Surface-volume interaction.
    pub interaction: Float,
}

impl RtResult {
    /// Create a new `RtResult`; the total is derived.
    ///
    /// * `surface`     - Surface contribution.
    /// * `volume`      - Volume contribution.
    /// * `interaction` - Interaction contribution.
    pub fn new(surface: Float, volume: Float, interaction: Float) -> Self {
        Self {
            total: surface + volume + interaction,
            surface,
            volume,
            interaction,
        }
    }

    /// A row of NaN values recorded for a failed sample.
    pub fn nan() -> Self {
        Self::new(Float::NAN, Float::NAN, Float::NAN)
    }

    /// Returns `true` if any contribution is NaN.
    pub fn is_nan(&self) -> bool {
        self.total.is_nan()
    }
}

impl fmt::Display for RtResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total = {}, surface = {}, volume = {}, interaction = {}",
            self.total, self.surface, self.volume, self.interaction
        )
    }
}

/// First order radiative transfer model of a uniform scattering layer above
/// a reflecting ground (Quast & Wagner 2016, doi:10.1364/AO.55.005379).
///
/// All contributions use the optical depth and albedo of the volume.
#[derive(Clone)]
pub struct Rt1 {
    /// Incident intensity and series truncation.
    config: Rt1Config,

    /// Incidence and exit angles.
    geometry: Geometry,

    /// The scattering layer.
    volume: ArcVolume,

    /// The ground.
    surface: ArcSurface,
}

impl Rt1 {
    /// Create a new `Rt1` model.
    ///
    /// * `config`   - Incident intensity and series truncation.
    /// * `geometry` - Incidence and exit angles.
    /// * `volume`   - The scattering layer.
    /// * `surface`  - The ground.
    pub fn new(
        config: Rt1Config,
        geometry: Geometry,
        volume: Option<ArcVolume>,
        surface: Option<ArcSurface>,
    ) -> Result<Self> {
        config.validate()?;
        let volume = volume.ok_or_else(|| Rt1Error::MissingParameter("volume information".into()))?;
        let surface =
            surface.ok_or_else(|| Rt1Error::MissingParameter("surface information".into()))?;
        Ok(Self {
            config,
            geometry,
            volume,
            surface,
        })
    }

    /// The geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Validated zenith cosines `(μ0, μex)`.
    fn mu(&self) -> Result<(Float, Float)> {
        Ok((
            validate_mu("mu_0", self.geometry.mu_0())?,
            validate_mu("mu_ex", self.geometry.mu_ex())?,
        ))
    }

    /// Two way attenuation `exp(-τ/μ0 - τ/μex)` of the layer.
    ///
    /// * `mu_0`  - Cosine of the incidence zenith angle.
    /// * `mu_ex` - Cosine of the exit zenith angle.
    fn attenuation(&self, mu_0: Float, mu_ex: Float) -> Float {
        let tau = self.volume.tau();
        (-(tau / mu_0) - tau / mu_ex).exp()
    }

    /// Surface contribution
    /// `I0 exp(-τ/μ0 - τ/μex) μ0 BRDF(cosθ(-μ0, μex, 0, 0))`.
    pub fn surface(&self) -> Result<Float> {
        let (mu_0, mu_ex) = self.mu()?;
        let ctheta = cos_theta(-mu_0, mu_ex, 0.0, 0.0);
        Ok(self.config.i0 * self.attenuation(mu_0, mu_ex) * mu_0 * self.surface.brdf(ctheta))
    }

    /// Volume contribution
    /// `I0 ω μ0 / (μ0 + μex) (1 - exp(-τ/μ0 - τ/μex)) p(θ0, θex, φ0, φex)`.
    pub fn volume(&self) -> Result<Float> {
        let (mu_0, mu_ex) = self.mu()?;
        let v = &self.volume;
        let p = v.p(&self.geometry)?;
        Ok(self.config.i0 * v.omega() * mu_0 / (mu_0 + mu_ex)
            * (1.0 - self.attenuation(mu_0, mu_ex))
            * p)
    }

    /// Interaction contribution
    /// `I0 μ0 ω (exp(-τ/μex) Fint(μ0, μex) + exp(-τ/μ0) Fint(μex, μ0))`.
    /// Without optical depth or albedo there is nothing to interact with and
    /// the contribution is 0.
    pub fn interaction(&self) -> Result<Float> {
        let (mu_0, mu_ex) = self.mu()?;
        let (omega, tau) = (self.volume.omega(), self.volume.tau());
        if tau == 0.0 || omega == 0.0 {
            return Ok(0.0);
        }

        let fn_ = fn_coefficients(self.volume.as_ref(), self.surface.as_ref(), &self.geometry)?;
        let nmax = self.config.nmax;
        let fint1 = interaction_term(mu_0, mu_ex, tau, &fn_, nmax)?;
        let fint2 = interaction_term(mu_ex, mu_0, tau, &fn_, nmax)?;
        trace!("Fint1 = {fint1}, Fint2 = {fint2} for {}", self.geometry);

        Ok(self.config.i0
            * mu_0
            * omega
            * ((-tau / mu_ex).exp() * fint1 + (-tau / mu_0).exp() * fint2))
    }

    /// Evaluates all contributions.
    pub fn calc(&self) -> Result<RtResult> {
        Ok(RtResult::new(self.surface()?, self.volume()?, self.interaction()?))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
