/// Convenience result type used across Prism.
pub type PrismResult<T> = Result<T, PrismError>;

/// Top-level error taxonomy used by engine and harness APIs.
///
/// Every failure in this crate is local and synchronous: it is reported to the
/// immediate caller and nothing is retried. There is no fatal error class.
#[derive(thiserror::Error, Debug)]
pub enum PrismError {
    /// Invalid caller-provided configuration: zero dimensions, an unknown
    /// effect index or name, or out-of-range effect parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame that violates its own invariants or does not match the engine
    /// size it is being applied against.
    #[error("frame error: {0}")]
    Frame(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PrismError {
    /// Build a [`PrismError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PrismError::Frame`] value.
    pub fn frame(msg: impl Into<String>) -> Self {
        Self::Frame(msg.into())
    }
}
