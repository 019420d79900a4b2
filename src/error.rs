use thiserror::Error;

/// Errors surfaced while scanning QR payloads.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Decoded text that matches no accepted fragment grammar, or an
    /// eagerly-validated single-part payload that failed validation.
    ///
    /// Recoverable: the scan loop logs it and moves on to the next frame.
    #[error("malformed QR fragment: {raw}")]
    MalformedFragment {
        /// The raw decoded text, kept verbatim for diagnostics.
        raw: String,
    },

    /// An unrecognized payload kind was requested. Fatal; surfaced before
    /// any scanning work starts.
    #[error("invalid payload kind: {0}")]
    InvalidKind(String),

    /// The frame source failed to open or to produce a frame.
    #[error("frame source error: {0}")]
    Source(String),
}
