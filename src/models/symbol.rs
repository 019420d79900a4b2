use super::BoundingBox;

/// One decoded barcode: the raw payload bytes plus where the symbol sits
/// in the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Decoded payload bytes. Conformant encoders emit UTF-8 text.
    pub data: Vec<u8>,
    /// Location in the frame, for preview annotation only.
    pub bounds: BoundingBox,
}

impl Symbol {
    /// Create a symbol from decoded bytes and its bounding box.
    pub fn new(data: Vec<u8>, bounds: BoundingBox) -> Self {
        Self { data, bounds }
    }

    /// Payload as UTF-8 text with surrounding whitespace trimmed.
    ///
    /// Non-UTF-8 bytes are replaced rather than treated as an error; a
    /// mangled payload then fails fragment parsing instead of aborting
    /// the scan.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).trim().to_string()
    }
}
