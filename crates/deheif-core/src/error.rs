//! Error types module
//!
//! All failure modes of a conversion run are unified under [`ConvertError`].
//! Eligibility misses are not errors; they are the designed skip path and
//! never surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// Network or media-store failure during download, upload, or send.
    /// Not retried; the caller decides retry policy.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Downloaded ciphertext does not match the hash declared in the media
    /// reference, or decryption itself rejects the payload. This is the sole
    /// end-to-end tamper check, so it aborts the run unconditionally.
    #[error("encrypted content failed integrity verification")]
    IntegrityMismatch,

    /// The fetched bytes are not a recognizable image container.
    #[error("unsupported image container: {0}")]
    UnsupportedFormat(String),

    /// A known container that fails to parse past its header.
    #[error("corrupt image data: {0}")]
    CorruptData(String),

    /// Internal codec failure while producing the target format. Unexpected
    /// in normal operation.
    #[error("image encoding failed: {0}")]
    EncodeFailure(String),

    /// The triggering message carries neither a plain locator nor an
    /// encrypted file reference.
    #[error("media message carries neither a plain url nor an encrypted file")]
    MalformedReference,

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;
