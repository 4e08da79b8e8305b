use derive_more::{Display, Error};

/// Failure taxonomy for bill and menu persistence. Errors propagate unchanged
/// through the service to the HTTP boundary; nothing downgrades them into
/// defaults.
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub(crate) enum StoreError {
    #[display("validation failed: {reason}")]
    Validation { reason: String },
    #[display("record not found")]
    NotFound,
    #[display("bill number conflict")]
    NumberConflict,
    #[display("store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl StoreError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn unavailable(reason: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            reason: reason.to_string(),
        }
    }
}
