//! Error types surfaced by the dispatcher.

use thiserror::Error;

/// Failures that abort a dispatch run.
///
/// Cost anomalies (zero efficiency, unknown plant type) are not errors: they
/// rank the plant last and are reported through
/// [`DispatchObserver`](crate::dispatch::DispatchObserver) instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// The request violates an input constraint.
    #[error("invalid input at `{field}`: {message}")]
    InvalidInput { field: String, message: String },

    /// The fleet cannot cover the requested load within tolerance.
    #[error("Unable to meet load demand with available plants. Missing: {unmet_mw:.1} MW")]
    InfeasibleDemand { unmet_mw: f64 },
}

impl DispatchError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}
