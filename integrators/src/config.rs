//! Model Configuration

use rt1_core::common::*;
use rt1_core::error::*;
use rt1_core::paramset::*;

/// Settings shared by every evaluation of the model.
///
/// NOTE: The interaction series is cut after `nmax` terms without any
/// convergence check. Results depend on `nmax` and are not verified
/// convergent, so there is no default value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rt1Config {
    /// Incident intensity `I0`.
    pub i0: Float,

    /// Number of terms of the interaction series.
    pub nmax: usize,
}

impl Rt1Config {
    /// Create a new `Rt1Config` with unit incident intensity.
    ///
    /// * `nmax` - Number of terms of the interaction series.
    pub fn new(nmax: usize) -> Self {
        Self { i0: 1.0, nmax }
    }

    /// Sets the incident intensity.
    ///
    /// * `i0` - Incident intensity.
    pub fn i0(mut self, i0: Float) -> Self {
        self.i0 = i0;
        self
    }

    /// Checks that the series has at least one term.
    pub fn validate(&self) -> Result<()> {
        if self.nmax == 0 {
            Err(Rt1Error::InvalidTruncation("nmax must be positive".into()))
        } else if !self.i0.is_finite() {
            Err(Rt1Error::InvalidParameter(format!(
                "incident intensity must be finite, got {}",
                self.i0
            )))
        } else {
            Ok(())
        }
    }
}

impl TryFrom<&ParamSet> for Rt1Config {
    type Error = Rt1Error;

    /// Reads the required `nmax` and the optional `I0` (default 1).
    ///
    /// * `params` - The parameter set.
    fn try_from(params: &ParamSet) -> Result<Self> {
        let nmax = match params.find_one_int("nmax") {
            Some(n) if n > 0 => n as usize,
            Some(n) => {
                return Err(Rt1Error::InvalidTruncation(format!(
                    "nmax must be positive, got {n}"
                )))
            }
            None => return Err(Rt1Error::MissingParameter("nmax".into())),
        };
        let config = Self::new(nmax).i0(params.find_one_float_or("I0", 1.0));
        config.validate()?;
        Ok(config)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_intensity() {
        let c = Rt1Config::new(10).i0(2.5);
        assert_eq!(c, Rt1Config { i0: 2.5, nmax: 10 });
        assert!(c.validate().is_ok());
        assert!(matches!(Rt1Config::new(0).validate(), Err(Rt1Error::InvalidTruncation(_))));
    }

    #[test]
    fn from_params() {
        let mut ps = ParamSet::new();
        assert!(matches!(Rt1Config::try_from(&ps), Err(Rt1Error::MissingParameter(_))));

        ps.add_int("nmax", &[0]);
        assert!(matches!(Rt1Config::try_from(&ps), Err(Rt1Error::InvalidTruncation(_))));

        ps.add_int("nmax", &[12]);
        assert_eq!(Rt1Config::try_from(&ps), Ok(Rt1Config::new(12)));

        ps.add_float("I0", &[3.0]);
        assert_eq!(Rt1Config::try_from(&ps), Ok(Rt1Config::new(12).i0(3.0)));
    }
}
