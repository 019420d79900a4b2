//! Fragment parsing for single and multi-part QR payloads.
//!
//! A scanned code is either a complete payload on its own, or one part of
//! a payload split across several codes with a `pXofY <data>` header
//! (1-based index, ASCII space separator). The two payload kinds differ
//! on purpose:
//! - `SignableTransaction`: strict two-token rule — anything beyond the
//!   header and one body token is malformed.
//! - `AccountMap`: the body may itself contain spaces and is kept
//!   verbatim after the header; single-part input is validated eagerly.

use tracing::debug;

use crate::error::ScanError;
use crate::models::{FrameFragment, PayloadKind};
use crate::validate::PayloadValidator;

/// Parse one decoded QR string into a [`FrameFragment`].
///
/// # Arguments
/// * `raw` - Decoded, whitespace-trimmed QR text
/// * `kind` - Declared payload kind, which picks the grammar
/// * `validator` - Consulted only for single-part `AccountMap` input
///
/// # Errors
/// [`ScanError::MalformedFragment`] when `raw` matches no accepted
/// grammar, or when eager account-map validation fails. The error carries
/// the raw string for diagnostics.
///
/// `index <= total` is deliberately not checked here; the scan session
/// owns that invariant.
pub fn parse_fragment<V>(
    raw: &str,
    kind: PayloadKind,
    validator: &V,
) -> Result<FrameFragment, ScanError>
where
    V: PayloadValidator + ?Sized,
{
    if raw.is_empty() {
        return Err(malformed(raw));
    }

    let Some((header, body)) = raw.split_once(' ') else {
        // No space: the whole string is the payload. Account maps are
        // checked against their grammar right away; transactions are
        // passed through for the downstream consumer to validate.
        if kind == PayloadKind::AccountMap {
            if let Err(err) = validator.validate(raw, kind) {
                debug!("account map failed validation: {err}");
                return Err(malformed(raw));
            }
        }
        return Ok(FrameFragment::single(raw));
    };

    let (index, total) = parse_header(header).ok_or_else(|| malformed(raw))?;

    if kind == PayloadKind::SignableTransaction && body.contains(' ') {
        // Strict two-token rule for transactions.
        return Err(malformed(raw));
    }

    Ok(FrameFragment::multi(index, total, body))
}

/// Match a `p<digits>of<digits>` header token exactly.
///
/// Digit groups are non-empty decimal integers >= 1, any length, leading
/// zeros allowed. Returns `(index, total)`.
fn parse_header(token: &str) -> Option<(usize, usize)> {
    let rest = token.strip_prefix('p')?;
    let (index, total) = rest.split_once("of")?;
    let index = parse_count(index)?;
    let total = parse_count(total)?;
    Some((index, total))
}

fn parse_count(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // A value too large for usize could never index a slot array anyway.
    let value = digits.parse::<usize>().ok()?;
    if value == 0 {
        return None;
    }
    Some(value)
}

fn malformed(raw: &str) -> ScanError {
    ScanError::MalformedFragment {
        raw: raw.to_string(),
    }
}
