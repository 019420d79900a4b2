//! qrgif - Multi-part QR payload scanner
//!
//! Reassembles one logical payload — a partially-signed transaction or an
//! account-map descriptor — from QR codes scanned frame by frame off a
//! camera feed. Payloads too large for one code are split by the sending
//! side into `pXofY <data>` chunks and cycled as an animated QR; this
//! crate detects single vs. multi-part codes, accumulates parts in
//! whatever order the camera catches them, and returns the assembled
//! payload once every part has been seen.
//!
//! Camera access, window rendering, and pixel-level QR decoding stay
//! behind the [`Camera`], [`SymbolDecoder`], and [`Preview`] traits; wire
//! up real devices there, or use [`tools`] to replay recorded scans.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Crate error types
pub mod error;
/// Core data structures (PayloadKind, FrameFragment, Symbol, BoundingBox)
pub mod models;
/// Frame presentation helpers (mirroring, symbol outlines)
pub mod overlay;
/// Fragment parsing (single-part and `pXofY` headers)
pub mod parser;
/// The scan loop and its collaborator traits
pub mod scanner;
/// Multi-frame accumulation state machine
pub mod session;
/// Replay harness for headless runs
pub mod tools;
/// Payload validation seam
pub mod validate;

pub use error::ScanError;
pub use models::{BoundingBox, FrameFragment, PayloadKind, Symbol};
pub use parser::parse_fragment;
pub use scanner::{
    Camera, NullPreview, Preview, PreviewCommand, ScanLoop, ScanOutcome, SymbolDecoder,
};
pub use session::{ScanSession, SessionEvent};
pub use validate::{AcceptAll, PayloadValidator, ValidationError};

/// Scan frames until a full payload of `kind` is assembled or the user
/// cancels.
///
/// # Arguments
/// * `camera` - Frame source; released on every exit path
/// * `decoder` - Barcode decoder applied to each frame
/// * `validator` - Consulted only for single-part account maps
/// * `preview` - Renders the feed and polls for cancellation
/// * `kind` - Which payload grammar to expect
///
/// # Returns
/// The tagged [`ScanOutcome`]; frame-source failures surface as
/// [`ScanError`].
pub fn scan<C, D, V, P>(
    camera: C,
    decoder: D,
    validator: V,
    preview: P,
    kind: PayloadKind,
) -> Result<ScanOutcome, ScanError>
where
    C: Camera,
    D: SymbolDecoder<C::Frame>,
    V: PayloadValidator,
    P: Preview<C::Frame>,
{
    ScanLoop::new(camera, decoder, validator, preview).run(kind)
}
