use thiserror::Error;

use crate::CurveIndex;

/// Errors reported by the sweep and the graph passes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopoError {
    /// The input cannot be swept: a non-finite coordinate, a
    /// tolerance that is not a positive number, or a reference to a
    /// curve that does not exist.
    #[error("degenerate input: {reason}")]
    DegenerateInput {
        reason: String,
        curve: Option<CurveIndex>,
    },

    /// An internal consistency check failed. The graph (or the sweep
    /// state) is not usable after this.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl TopoError {
    pub(crate) fn degenerate<S: Into<String>>(reason: S) -> Self {
        TopoError::DegenerateInput {
            reason: reason.into(),
            curve: None,
        }
    }

    pub(crate) fn degenerate_curve<S: Into<String>>(curve: CurveIndex, reason: S) -> Self {
        TopoError::DegenerateInput {
            reason: reason.into(),
            curve: Some(curve),
        }
    }

    pub(crate) fn invariant<S: Into<String>>(msg: S) -> Self {
        TopoError::InvariantViolation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, TopoError>;
