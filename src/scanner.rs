//! The frame-pulling scan loop and its collaborator seams.
//!
//! Hardware and UI stay behind three traits: a [`Camera`] yields frames, a
//! [`SymbolDecoder`] finds barcodes in them, and a [`Preview`] renders the
//! mirrored feed and reports cancellation. The loop itself is
//! single-threaded and blocking: it absorbs fragments strictly in frame
//! order and suspends only while waiting on the camera or the preview.

use tracing::{debug, info, warn};

use crate::error::ScanError;
use crate::models::{BoundingBox, PayloadKind, Symbol};
use crate::parser::parse_fragment;
use crate::session::{ScanSession, SessionEvent};
use crate::validate::PayloadValidator;

/// A camera-like frame source.
///
/// The device is acquired with [`Camera::open`] and torn down with
/// [`Camera::release`]; the scan loop guarantees release exactly once on
/// every exit path, including cancellation and errors.
pub trait Camera {
    /// Opaque device handle, alive between `open` and `release`.
    type Handle;
    /// One captured frame.
    type Frame;

    /// Acquire the device.
    fn open(&mut self) -> Result<Self::Handle, ScanError>;

    /// Block until the next frame is available. The sequence is
    /// effectively infinite; running out of frames is a source error.
    fn next_frame(&mut self, handle: &mut Self::Handle) -> Result<Self::Frame, ScanError>;

    /// Tear the device down.
    fn release(&mut self, handle: Self::Handle);
}

impl<C: Camera + ?Sized> Camera for &mut C {
    type Handle = C::Handle;
    type Frame = C::Frame;

    fn open(&mut self) -> Result<Self::Handle, ScanError> {
        (**self).open()
    }

    fn next_frame(&mut self, handle: &mut Self::Handle) -> Result<Self::Frame, ScanError> {
        (**self).next_frame(handle)
    }

    fn release(&mut self, handle: Self::Handle) {
        (**self).release(handle)
    }
}

/// Finds barcodes in a frame.
pub trait SymbolDecoder<F> {
    /// Decode zero or more symbols out of `frame`.
    fn decode(&mut self, frame: &F) -> Vec<Symbol>;
}

impl<D: SymbolDecoder<F> + ?Sized, F> SymbolDecoder<F> for &mut D {
    fn decode(&mut self, frame: &F) -> Vec<Symbol> {
        (**self).decode(frame)
    }
}

/// Verdict from one preview pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewCommand {
    /// Keep scanning.
    Continue,
    /// The user asked to stop (e.g. pressed escape).
    Cancel,
}

/// Renders the live feed and polls for cancellation, once per iteration.
///
/// Implementations typically mirror the frame and outline the decoded
/// symbols (see [`crate::overlay`]); both are side effects only and play
/// no part in payload logic.
pub trait Preview<F> {
    /// Show `frame`, annotated with `boxes`, and report the user command.
    fn present(&mut self, frame: &F, boxes: &[BoundingBox]) -> PreviewCommand;
}

impl<P: Preview<F> + ?Sized, F> Preview<F> for &mut P {
    fn present(&mut self, frame: &F, boxes: &[BoundingBox]) -> PreviewCommand {
        (**self).present(frame, boxes)
    }
}

/// Preview that renders nothing and never cancels. For headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPreview;

impl<F> Preview<F> for NullPreview {
    fn present(&mut self, _frame: &F, _boxes: &[BoundingBox]) -> PreviewCommand {
        PreviewCommand::Continue
    }
}

/// How a scan ended.
///
/// Cancellation is a first-class outcome, not an error and not an empty
/// payload: callers distinguish an abandoned scan from a completed one by
/// the variant alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// All parts were seen; carries the assembled payload.
    Completed(String),
    /// The user cancelled before the payload was complete.
    Cancelled,
}

impl ScanOutcome {
    /// The assembled payload, if the scan completed.
    pub fn payload(&self) -> Option<&str> {
        match self {
            ScanOutcome::Completed(payload) => Some(payload),
            ScanOutcome::Cancelled => None,
        }
    }

    /// Consume the outcome, keeping the payload if the scan completed.
    pub fn into_payload(self) -> Option<String> {
        match self {
            ScanOutcome::Completed(payload) => Some(payload),
            ScanOutcome::Cancelled => None,
        }
    }

    /// True when the scan was abandoned.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ScanOutcome::Cancelled)
    }
}

/// RAII wrapper around an open camera handle. Dropping it releases the
/// device, which covers every exit path of the loop including unwinds.
struct CameraGuard<'a, C: Camera> {
    camera: &'a mut C,
    handle: Option<C::Handle>,
}

impl<'a, C: Camera> CameraGuard<'a, C> {
    fn open(camera: &'a mut C) -> Result<Self, ScanError> {
        let handle = camera.open()?;
        Ok(Self {
            camera,
            handle: Some(handle),
        })
    }

    fn next_frame(&mut self) -> Result<C::Frame, ScanError> {
        match self.handle.as_mut() {
            Some(handle) => self.camera.next_frame(handle),
            None => Err(ScanError::Source("camera handle already released".into())),
        }
    }
}

impl<C: Camera> Drop for CameraGuard<'_, C> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.camera.release(handle);
        }
    }
}

/// Pulls frames, decodes them, and accumulates fragments until a payload
/// of the requested kind is complete.
///
/// At most one decoded symbol per frame is consumed — the first one the
/// decoder reports. Frames holding several codes at once are a display
/// aid on the sending side, not a batching mechanism.
pub struct ScanLoop<C, D, V, P> {
    camera: C,
    decoder: D,
    validator: V,
    preview: P,
}

impl<C, D, V, P> ScanLoop<C, D, V, P>
where
    C: Camera,
    D: SymbolDecoder<C::Frame>,
    V: PayloadValidator,
    P: Preview<C::Frame>,
{
    /// Assemble a scan loop from its collaborators.
    pub fn new(camera: C, decoder: D, validator: V, preview: P) -> Self {
        Self {
            camera,
            decoder,
            validator,
            preview,
        }
    }

    /// Scan until a full payload of `kind` is assembled or the user
    /// cancels.
    ///
    /// Malformed frames are logged and skipped; they never abort the
    /// loop. There is no timeout — with no code in view the loop waits
    /// indefinitely, which matches a human-operated scanning workflow.
    ///
    /// # Errors
    /// Fails only when the frame source does, never because of what was
    /// (or wasn't) scanned.
    pub fn run(&mut self, kind: PayloadKind) -> Result<ScanOutcome, ScanError> {
        let mut camera = CameraGuard::open(&mut self.camera)?;
        let mut session = ScanSession::new();
        info!("starting {kind} scan");

        loop {
            let frame = camera.next_frame()?;

            let symbols = self.decoder.decode(&frame);
            let boxes: Vec<BoundingBox> = symbols.iter().map(|symbol| symbol.bounds).collect();

            // Cancellation is cooperative, polled once per iteration.
            if self.preview.present(&frame, &boxes) == PreviewCommand::Cancel {
                info!("scan cancelled");
                return Ok(ScanOutcome::Cancelled);
            }

            // Consume at most the first symbol found in this frame.
            let Some(symbol) = symbols.into_iter().next() else {
                continue;
            };
            let raw = symbol.text();

            let fragment = match parse_fragment(&raw, kind, &self.validator) {
                Ok(fragment) => fragment,
                Err(err) => {
                    warn!("skipping frame: {err}");
                    continue;
                }
            };

            let part_index = fragment.index();
            match session.absorb(fragment) {
                SessionEvent::Completed(payload) => {
                    info!("scan complete ({} chars)", payload.len());
                    return Ok(ScanOutcome::Completed(payload));
                }
                SessionEvent::Progressed => {
                    if let Some(total) = session.total() {
                        info!("scanned {} of {} QRs", session.filled(), total);
                    }
                }
                SessionEvent::AlreadyFilled => {
                    debug!("already scanned QR #{part_index}, ignoring");
                }
                SessionEvent::Rejected => {
                    warn!("fragment disagrees with capture in progress, ignoring");
                }
            }
        }
    }
}
