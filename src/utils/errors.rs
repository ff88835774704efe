use thiserror::Error;

/**
 * Crate-wide error type.
 *
 * <p>Every variant carries a preformatted message. All failures are caller-input
 * errors that are detected before any observable state mutation, so there is no
 * recoverable/fatal distinction.</p>
 */
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepeatAnalyzerError {
    /// A capacity handed to the constructor makes no sense (zero length or period).
    #[error("invalid analyzer configuration: {0}")]
    Configuration(String),

    /// A sequence handed to `load` exceeds the capacity fixed at construction.
    #[error("input sequence is too long: {0}")]
    InputTooLong(String),

    /// A query referenced a position outside the loaded sequence.
    #[error("cannot query outside the loaded sequence: {0}")]
    OutOfRange(String),
}
