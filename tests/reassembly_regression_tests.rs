//! Integration tests for multi-frame payload reassembly
//!
//! These tests drive the full scan loop — camera, decoder, parser,
//! session — through the replay harness, covering the flows a human
//! operator produces in practice: animated QRs caught out of order,
//! frames re-read by the camera, junk frames, and mid-scan cancellation.

use std::cell::RefCell;

use qrgif::tools::{CancelAfter, ReplayCamera, ReplayDecoder, TextFrame};
use qrgif::{
    AcceptAll, NullPreview, PayloadKind, ScanError, ScanOutcome, ValidationError, scan,
};

#[test]
fn test_psbt_gif_with_duplicate_frame() {
    // The camera re-reads the first code before the sender cycles on.
    let mut camera = ReplayCamera::from_codes(["p1of2 AAA", "p1of2 AAA", "p2of2 BBB"]);
    let outcome = scan(
        &mut camera,
        ReplayDecoder,
        AcceptAll,
        NullPreview,
        PayloadKind::SignableTransaction,
    )
    .unwrap();

    assert_eq!(outcome, ScanOutcome::Completed("AAABBB".to_string()));
    assert!(camera.released());
}

#[test]
fn test_single_frame_account_map_is_validated_verbatim() {
    let descriptor = "wsh(sortedmulti(2,[deadbeef/48h]xpubA,[cafebabe/48h]xpubB))";
    let calls: RefCell<Vec<(String, PayloadKind)>> = RefCell::new(Vec::new());
    let validator = |text: &str, kind: PayloadKind| -> Result<(), ValidationError> {
        calls.borrow_mut().push((text.to_string(), kind));
        Ok(())
    };
    let camera = ReplayCamera::from_codes([descriptor]);

    let outcome = scan(
        camera,
        ReplayDecoder,
        validator,
        NullPreview,
        PayloadKind::AccountMap,
    )
    .unwrap();

    assert_eq!(outcome.into_payload().as_deref(), Some(descriptor));
    assert_eq!(
        calls.into_inner(),
        vec![(descriptor.to_string(), PayloadKind::AccountMap)]
    );
}

#[test]
fn test_multi_part_account_map_never_hits_validator() {
    let calls: RefCell<usize> = RefCell::new(0);
    let validator = |_: &str, _: PayloadKind| -> Result<(), ValidationError> {
        *calls.borrow_mut() += 1;
        Err(ValidationError::new("should never be consulted"))
    };
    let camera = ReplayCamera::from_codes(["p1of2 wsh(sortedmulti(", "p2of2 ...))"]);

    let outcome = scan(
        camera,
        ReplayDecoder,
        validator,
        NullPreview,
        PayloadKind::AccountMap,
    )
    .unwrap();

    // Header-stripped parts, concatenated with no separator.
    assert_eq!(
        outcome.into_payload().as_deref(),
        Some("wsh(sortedmulti(...))")
    );
    assert_eq!(calls.into_inner(), 0);
}

#[test]
fn test_rejected_single_part_account_map_is_skipped_not_fatal() {
    // First frame fails validation; the loop keeps scanning and a later
    // multi-part capture still completes.
    let calls: RefCell<usize> = RefCell::new(0);
    let validator = |_: &str, _: PayloadKind| -> Result<(), ValidationError> {
        *calls.borrow_mut() += 1;
        Err(ValidationError::new("not a descriptor"))
    };
    let camera = ReplayCamera::from_codes(["garbage", "p1of2 wsh(", "p2of2 ...)"]);

    let outcome = scan(
        camera,
        ReplayDecoder,
        validator,
        NullPreview,
        PayloadKind::AccountMap,
    )
    .unwrap();

    assert_eq!(outcome.into_payload().as_deref(), Some("wsh(...)"));
    assert_eq!(calls.into_inner(), 1);
}

#[test]
fn test_cancellation_releases_camera_and_keeps_no_payload() {
    let mut camera = ReplayCamera::from_codes(["p1of3 AAA", "p2of3 BBB", "p3of3 CCC"]);
    let outcome = scan(
        &mut camera,
        ReplayDecoder,
        AcceptAll,
        CancelAfter::new(1),
        PayloadKind::SignableTransaction,
    )
    .unwrap();

    assert!(outcome.is_cancelled());
    assert_eq!(outcome.payload(), None);
    assert!(camera.released());
    // The third code was never pulled.
    assert_eq!(camera.remaining(), 1);
}

#[test]
fn test_exhausted_frame_source_errors_and_releases() {
    let mut camera = ReplayCamera::from_codes(["p1of2 AAA"]);
    let err = scan(
        &mut camera,
        ReplayDecoder,
        AcceptAll,
        NullPreview,
        PayloadKind::SignableTransaction,
    )
    .unwrap_err();

    assert!(matches!(err, ScanError::Source(_)));
    assert!(camera.released());
}

#[test]
fn test_empty_and_malformed_frames_are_skipped() {
    let frames: Vec<TextFrame> = vec![
        vec![],
        vec!["p1of2 AAA extra-token".to_string()],
        vec!["p1of2 AAA".to_string()],
        vec![],
        vec!["not a header".to_string()],
        vec!["p2of2 BBB".to_string()],
    ];
    let camera = ReplayCamera::new(frames);

    let outcome = scan(
        camera,
        ReplayDecoder,
        AcceptAll,
        NullPreview,
        PayloadKind::SignableTransaction,
    )
    .unwrap();

    assert_eq!(outcome.into_payload().as_deref(), Some("AAABBB"));
}

#[test]
fn test_only_first_symbol_per_frame_is_consumed() {
    // The second symbol in the first frame carries a decoy part 2; if the
    // loop consumed more than one symbol per frame, the decoy would land
    // in slot 2 before the real one.
    let frames: Vec<TextFrame> = vec![
        vec!["p1of2 AAA".to_string(), "p2of2 XXX".to_string()],
        vec!["p2of2 BBB".to_string()],
    ];
    let camera = ReplayCamera::new(frames);

    let outcome = scan(
        camera,
        ReplayDecoder,
        AcceptAll,
        NullPreview,
        PayloadKind::SignableTransaction,
    )
    .unwrap();

    assert_eq!(outcome.into_payload().as_deref(), Some("AAABBB"));
}

#[test]
fn test_single_part_code_wins_mid_gif() {
    // Scanning starts on an animated QR, then the operator switches to a
    // code that carries the whole payload.
    let camera = ReplayCamera::from_codes(["p1of5 AAA", "cHNidP8BAHEC"]);

    let outcome = scan(
        camera,
        ReplayDecoder,
        AcceptAll,
        NullPreview,
        PayloadKind::SignableTransaction,
    )
    .unwrap();

    assert_eq!(outcome.into_payload().as_deref(), Some("cHNidP8BAHEC"));
}

#[test]
fn test_mismatched_part_count_is_ignored() {
    // A frame from a different capture (4 parts) shows up mid-scan; it is
    // dropped and the 2-part capture still completes.
    let camera = ReplayCamera::from_codes(["p1of2 AAA", "p2of4 XXX", "p2of2 BBB"]);

    let outcome = scan(
        camera,
        ReplayDecoder,
        AcceptAll,
        NullPreview,
        PayloadKind::SignableTransaction,
    )
    .unwrap();

    assert_eq!(outcome.into_payload().as_deref(), Some("AAABBB"));
}
