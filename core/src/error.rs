//! Error types for RT1

use thiserror::Error;

/// Failures raised at the boundary of the offending operation.
///
/// Construction errors (`MissingParameter`, `InvalidParameter`,
/// `Normalization`) make the object unusable. Evaluation errors (`Domain`,
/// `NumericOverflow`) only concern one geometry sample.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rt1Error {
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("normalization error: {0}")]
    Normalization(String),

    #[error("invalid truncation: {0}")]
    InvalidTruncation(String),

    #[error("domain error: {0}")]
    Domain(String),

    #[error("numeric overflow: {0}")]
    NumericOverflow(String),
}

impl Rt1Error {
    /// Returns `true` for errors that only invalidate a single geometry
    /// sample and may be recorded as `NaN` by a sweep.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Domain(_) | Self::NumericOverflow(_))
    }
}

pub type Result<T> = std::result::Result<T, Rt1Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_evaluation_errors_are_recoverable() {
        assert!(Rt1Error::Domain("mu".into()).is_recoverable());
        assert!(Rt1Error::NumericOverflow("Ei".into()).is_recoverable());
        assert!(!Rt1Error::Normalization("w".into()).is_recoverable());
        assert!(!Rt1Error::MissingParameter("t".into()).is_recoverable());
    }

    #[test]
    fn display_includes_message() {
        let e = Rt1Error::InvalidTruncation("ncoefs = 0".into());
        assert_eq!(format!("{e}"), "invalid truncation: ncoefs = 0");
    }
}
