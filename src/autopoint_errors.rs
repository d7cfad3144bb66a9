use thiserror::Error;

use crate::constants::Float;
use crate::tle::ParseTleError;

/// Failure of a single propagation call.
///
/// Every kind is deterministic for a given record and elapsed time; retrying only makes sense
/// with another time or a re-initialized record.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PropagationError {
    #[error("Mean eccentricity out of [-0.001, 1.0) at t = {tsince} min: {eccentricity}")]
    Eccentricity { tsince: Float, eccentricity: Float },

    #[error("Mean motion is not positive at t = {tsince} min: {mean_motion}")]
    MeanMotion { tsince: Float, mean_motion: Float },

    #[error("Perturbed eccentricity out of [0, 1] at t = {tsince} min: {eccentricity}")]
    PerturbedEccentricity { tsince: Float, eccentricity: Float },

    #[error("Negative semi-latus rectum at t = {tsince} min: {semi_latus_rectum}")]
    SemiLatusRectum {
        tsince: Float,
        semi_latus_rectum: Float,
    },

    #[error("Satellite has decayed at t = {tsince} min (radius {radius} earth radii)")]
    Decay { tsince: Float, radius: Float },
}

impl PropagationError {
    /// Legacy integer error code (1, 2, 3, 4 or 6).
    pub fn code(&self) -> u8 {
        match self {
            PropagationError::Eccentricity { .. } => 1,
            PropagationError::MeanMotion { .. } => 2,
            PropagationError::PerturbedEccentricity { .. } => 3,
            PropagationError::SemiLatusRectum { .. } => 4,
            PropagationError::Decay { .. } => 6,
        }
    }

    /// Elapsed time of the failing call, in minutes.
    pub fn tsince(&self) -> Float {
        match *self {
            PropagationError::Eccentricity { tsince, .. }
            | PropagationError::MeanMotion { tsince, .. }
            | PropagationError::PerturbedEccentricity { tsince, .. }
            | PropagationError::SemiLatusRectum { tsince, .. }
            | PropagationError::Decay { tsince, .. } => tsince,
        }
    }

    /// Whether both errors are of the same kind, ignoring the carried diagnostics.
    pub fn same_kind(&self, other: &PropagationError) -> bool {
        self.code() == other.code()
    }
}

#[derive(Error, Debug)]
pub enum AutopointError {
    #[error("Propagation failed: {0}")]
    Propagation(#[from] PropagationError),

    #[error("Invalid mean elements: {0}")]
    InvalidElements(String),

    #[error("Invalid gravity model: {0}")]
    InvalidGravityModel(String),

    #[error("Invalid operation mode: {0:?}")]
    InvalidOpsMode(char),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Error during the two-line element parsing: {0}")]
    TleParsing(ParseTleError),

    #[error("System clock error: {0}")]
    Clock(#[from] hifitime::HifitimeError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),
}

impl AutopointError {
    /// Legacy integer code of a propagation failure.
    ///
    /// Return
    /// ------
    /// * `Some(1..=6)` for propagation failures, `None` for every other variant.
    pub fn code(&self) -> Option<u8> {
        match self {
            AutopointError::Propagation(err) => Some(err.code()),
            _ => None,
        }
    }
}

impl From<ParseTleError> for AutopointError {
    fn from(err: ParseTleError) -> Self {
        AutopointError::TleParsing(err)
    }
}

impl PartialEq for AutopointError {
    fn eq(&self, other: &Self) -> bool {
        use AutopointError::*;
        match (self, other) {
            (Propagation(a), Propagation(b)) => a == b,

            (InvalidElements(a), InvalidElements(b)) => a == b,
            (InvalidGravityModel(a), InvalidGravityModel(b)) => a == b,
            (InvalidOpsMode(a), InvalidOpsMode(b)) => a == b,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,
            (TleParsing(a), TleParsing(b)) => a == b,

            (Clock(_), Clock(_)) => true,
            (Csv(_), Csv(_)) => true,
            (Io(_), Io(_)) => true,

            _ => false,
        }
    }
}

#[cfg(test)]
mod autopoint_errors_test {
    use super::*;

    #[test]
    fn test_legacy_codes() {
        let err: AutopointError = PropagationError::Decay {
            tsince: 10.0,
            radius: 0.99,
        }
        .into();
        assert_eq!(err.code(), Some(6));
        assert_eq!(
            PropagationError::MeanMotion {
                tsince: 0.0,
                mean_motion: -1.0
            }
            .code(),
            2
        );
        assert_eq!(AutopointError::InvalidOpsMode('x').code(), None);
    }

    #[test]
    fn test_same_kind_ignores_diagnostics() {
        let a = PropagationError::Eccentricity {
            tsince: 1.0,
            eccentricity: 1.2,
        };
        let b = PropagationError::Eccentricity {
            tsince: 50.0,
            eccentricity: -0.3,
        };
        assert!(a.same_kind(&b));
        assert_ne!(a, b);
        assert_eq!(b.tsince(), 50.0);
        assert!(!a.same_kind(&PropagationError::PerturbedEccentricity {
            tsince: 1.0,
            eccentricity: 1.2
        }));
    }

    #[test]
    fn test_display() {
        let err = AutopointError::InvalidGravityModel("egm08".into());
        assert_eq!(err.to_string(), "Invalid gravity model: egm08");
    }
}
