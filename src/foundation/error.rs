/// Convenience result type used across signcard.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by session and ledger APIs.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Rejected user input (blank signer name, empty signature pad).
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration values outside their accepted ranges.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`CardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error came from rejected user input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Per-entry failure to turn a signature's encoded bytes into a stamp bitmap.
///
/// Decode failures never abort a composite batch: the entry is simply not stamped and the error is
/// handed to the [`Diagnostics`](crate::Diagnostics) collaborator.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("decode error for signature #{index}: {reason}")]
pub struct DecodeError {
    /// Ledger index of the signature that failed to decode.
    pub index: u64,
    /// Human-readable failure cause.
    pub reason: String,
}

impl DecodeError {
    /// Build a [`DecodeError`] for ledger entry `index`.
    pub fn new(index: u64, reason: impl Into<String>) -> Self {
        Self {
            index,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
