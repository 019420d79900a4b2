//! Replay harness shared by the CLI, integration tests, and benches.
//!
//! The production collaborators are hardware-bound; the types here stand
//! in for them with scripted frames of pre-decoded text, so the full scan
//! loop can run headless — against a recorded capture, a fixture file, or
//! stdin.

use std::collections::VecDeque;

use crate::error::ScanError;
use crate::models::{BoundingBox, Symbol};
use crate::scanner::{Camera, Preview, PreviewCommand, SymbolDecoder};

/// A replay frame: the decoded texts a real barcode decoder would have
/// found in the image. Empty means no code was in view.
pub type TextFrame = Vec<String>;

/// Scripted camera yielding pre-recorded frames in order.
///
/// Running out of frames is a source error, mirroring a real device
/// dying mid-scan; a complete script therefore must finish the payload
/// (or cancel) before the last frame.
#[derive(Debug)]
pub struct ReplayCamera {
    frames: VecDeque<TextFrame>,
    released: bool,
}

impl ReplayCamera {
    /// Build a camera from scripted frames.
    pub fn new(frames: Vec<TextFrame>) -> Self {
        Self {
            frames: frames.into(),
            released: false,
        }
    }

    /// Build a camera where each code is its own single-symbol frame.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            codes
                .into_iter()
                .map(|code| vec![code.into()])
                .collect(),
        )
    }

    /// True once the scan loop has released the device.
    pub fn released(&self) -> bool {
        self.released
    }

    /// Frames not yet consumed.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl Camera for ReplayCamera {
    type Handle = ();
    type Frame = TextFrame;

    fn open(&mut self) -> Result<Self::Handle, ScanError> {
        Ok(())
    }

    fn next_frame(&mut self, _handle: &mut Self::Handle) -> Result<Self::Frame, ScanError> {
        self.frames
            .pop_front()
            .ok_or_else(|| ScanError::Source("replay frames exhausted".into()))
    }

    fn release(&mut self, _handle: Self::Handle) {
        self.released = true;
    }
}

/// Decoder that trusts replay frames verbatim: every text in the frame
/// becomes one symbol with an empty bounding box.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplayDecoder;

impl SymbolDecoder<TextFrame> for ReplayDecoder {
    fn decode(&mut self, frame: &TextFrame) -> Vec<Symbol> {
        frame
            .iter()
            .map(|text| Symbol::new(text.clone().into_bytes(), BoundingBox::default()))
            .collect()
    }
}

/// Preview that cancels after a fixed number of frames.
///
/// Drives the loop to its cancellation path without a keyboard: the first
/// `frames` presentations continue, the next one cancels.
#[derive(Debug)]
pub struct CancelAfter {
    remaining: usize,
}

impl CancelAfter {
    /// Continue for `frames` presentations, then cancel.
    pub fn new(frames: usize) -> Self {
        Self { remaining: frames }
    }
}

impl<F> Preview<F> for CancelAfter {
    fn present(&mut self, _frame: &F, _boxes: &[BoundingBox]) -> PreviewCommand {
        if self.remaining == 0 {
            return PreviewCommand::Cancel;
        }
        self.remaining -= 1;
        PreviewCommand::Continue
    }
}
