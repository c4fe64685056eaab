//! Property-based tests for faults
//!
//! These tests use proptest to generate random kinds, payloads and chain
//! shapes and verify that classification, extraction and display invariants
//! hold.

use faults::{
    ConflictViolation, FailureKind, Fault, FieldViolation, PreconditionViolation, QuotaViolation,
};
use proptest::prelude::*;
use std::io;
use std::time::Duration;

// ============================================================================
// HELPERS
// ============================================================================

fn kind_strategy() -> impl Strategy<Value = FailureKind> {
    prop::sample::select(FailureKind::ALL.to_vec())
}

/// Fresh fault of `kind` with no cause, using the shared constants for the
/// zero-detail kinds.
fn fresh(kind: FailureKind) -> Fault {
    match kind {
        FailureKind::Unauthenticated => faults::UNAUTHENTICATED,
        FailureKind::PermissionDenied => faults::PERMISSION_DENIED,
        FailureKind::NotFound => faults::NOT_FOUND,
        FailureKind::Bad => faults::bad([]),
        FailureKind::FailedPrecondition => faults::failed_precondition([]),
        FailureKind::Aborted => faults::aborted([]),
        FailureKind::Unavailable => faults::unavailable(Duration::ZERO),
        FailureKind::ResourceExhausted => faults::resource_exhausted([]),
        FailureKind::Unimplemented => faults::UNIMPLEMENTED,
    }
}

/// Wrap `cause` in a fault of `kind` carrying one violation named `tag`.
fn wrap(kind: FailureKind, cause: impl Into<faults::BoxError>, tag: &str) -> Fault {
    match kind {
        FailureKind::Unauthenticated => faults::with_unauthenticated(cause),
        FailureKind::PermissionDenied => faults::with_permission_denied(cause),
        FailureKind::NotFound => faults::with_not_found(cause),
        FailureKind::Bad => faults::with_bad(cause, [FieldViolation::new(tag, "bad")]),
        FailureKind::FailedPrecondition => faults::with_failed_precondition(
            cause,
            [PreconditionViolation::new("T", tag, "precondition")],
        ),
        FailureKind::Aborted => faults::with_aborted(cause, [ConflictViolation::new(tag, "conflict")]),
        FailureKind::Unavailable => faults::with_unavailable(cause, Duration::from_secs(1)),
        FailureKind::ResourceExhausted => {
            faults::with_resource_exhausted(cause, [QuotaViolation::new(tag, "quota")])
        }
        FailureKind::Unimplemented => faults::with_unimplemented(cause),
    }
}

/// Per-kind classifier, so tests exercise the public `is_*` functions
/// rather than only the generic one.
fn is(kind: FailureKind, err: &Fault) -> bool {
    match kind {
        FailureKind::Unauthenticated => faults::is_unauthenticated(err),
        FailureKind::PermissionDenied => faults::is_permission_denied(err),
        FailureKind::NotFound => faults::is_not_found(err),
        FailureKind::Bad => faults::is_bad(err),
        FailureKind::FailedPrecondition => faults::is_failed_precondition(err),
        FailureKind::Aborted => faults::is_aborted(err),
        FailureKind::Unavailable => faults::is_unavailable(err),
        FailureKind::ResourceExhausted => faults::is_resource_exhausted(err),
        FailureKind::Unimplemented => faults::is_unimplemented(err),
    }
}

/// Per-kind extractor reduced to "did it find something".
fn extracts(kind: FailureKind, err: &Fault) -> bool {
    match kind {
        FailureKind::Unauthenticated => faults::as_unauthenticated(err).is_some(),
        FailureKind::PermissionDenied => faults::as_permission_denied(err).is_some(),
        FailureKind::NotFound => faults::as_not_found(err).is_some(),
        FailureKind::Bad => faults::as_bad(err).is_some(),
        FailureKind::FailedPrecondition => faults::as_failed_precondition(err).is_some(),
        FailureKind::Aborted => faults::as_aborted(err).is_some(),
        FailureKind::Unavailable => faults::as_unavailable(err).is_some(),
        FailureKind::ResourceExhausted => faults::as_resource_exhausted(err).is_some(),
        FailureKind::Unimplemented => faults::as_unimplemented(err).is_some(),
    }
}

/// Subject of the first violation of the outermost fault of `kind`.
fn extracted_tag(kind: FailureKind, err: &Fault) -> Option<String> {
    match kind {
        FailureKind::Bad => faults::as_bad(err).map(|f| f.violations()[0].field.clone()),
        FailureKind::FailedPrecondition => {
            faults::as_failed_precondition(err).map(|f| f.violations()[0].subject.clone())
        }
        FailureKind::Aborted => faults::as_aborted(err).map(|f| f.violations()[0].resource.clone()),
        FailureKind::ResourceExhausted => {
            faults::as_resource_exhausted(err).map(|f| f.violations()[0].subject.clone())
        }
        _ => None,
    }
}

// ============================================================================
// CLASSIFICATION PROPERTIES
// ============================================================================

proptest! {
    /// A fresh fault is classified as its own kind and nothing else
    #[test]
    fn fresh_fault_matches_only_its_kind(kind in kind_strategy()) {
        let err = fresh(kind);

        for other in FailureKind::ALL {
            prop_assert_eq!(is(other, &err), other == kind);
            prop_assert_eq!(extracts(other, &err), other == kind);
        }
    }

    /// Wrapping adds the outer kind and keeps every inner kind visible
    #[test]
    fn wrapping_preserves_inner_categories(
        kinds in prop::collection::vec(kind_strategy(), 1..6),
    ) {
        let mut err = wrap(kinds[0], io::Error::other("base"), "layer0");
        for (depth, kind) in kinds.iter().enumerate().skip(1) {
            err = wrap(*kind, err, &format!("layer{depth}"));
        }

        for kind in FailureKind::ALL {
            prop_assert_eq!(is(kind, &err), kinds.contains(&kind));
            prop_assert_eq!(faults::is_kind(&err, kind), kinds.contains(&kind));
        }
        prop_assert_eq!(faults::kind_of(&err), kinds.last().copied());
    }

    /// Extraction returns the outermost layer of the requested kind
    #[test]
    fn extraction_returns_outermost_match(
        kinds in prop::collection::vec(kind_strategy(), 1..6),
    ) {
        let mut err = wrap(kinds[0], io::Error::other("base"), "layer0");
        for (depth, kind) in kinds.iter().enumerate().skip(1) {
            err = wrap(*kind, err, &format!("layer{depth}"));
        }

        for kind in FailureKind::ALL.into_iter().filter(|k| k.has_violations()) {
            let expected = kinds
                .iter()
                .rposition(|k| *k == kind)
                .map(|depth| format!("layer{depth}"));
            prop_assert_eq!(extracted_tag(kind, &err), expected);
        }
    }

    /// Classifying never changes the answer
    #[test]
    fn classification_is_idempotent(kind in kind_strategy(), outer in kind_strategy()) {
        let err = wrap(outer, fresh(kind), "tag");
        let before: Vec<bool> = FailureKind::ALL.iter().map(|k| is(*k, &err)).collect();
        let rendered = err.to_string();

        for _ in 0..3 {
            let again: Vec<bool> = FailureKind::ALL.iter().map(|k| is(*k, &err)).collect();
            prop_assert_eq!(&again, &before);
        }
        prop_assert_eq!(err.to_string(), rendered);
    }
}

// ============================================================================
// DISPLAY PROPERTIES
// ============================================================================

proptest! {
    /// Violation descriptions are joined in insertion order
    #[test]
    fn descriptions_join_in_order(
        descriptions in prop::collection::vec("[a-zA-Z0-9 ]{1,40}", 1..8),
    ) {
        let err = faults::bad(
            descriptions
                .iter()
                .enumerate()
                .map(|(i, d)| FieldViolation::new(format!("f{i}"), d.clone())),
        );

        prop_assert_eq!(err.to_string(), descriptions.join(". "));
    }

    /// A cause is appended after a colon for violation kinds
    #[test]
    fn cause_is_appended(description in "[a-z]{1,20}", cause in "[a-z]{1,20}") {
        let err = faults::with_resource_exhausted(
            cause.clone(),
            [QuotaViolation::new("s", description.clone())],
        );
        prop_assert_eq!(err.to_string(), format!("{description}: {cause}"));
    }

    /// Zero-detail kinds never show their cause
    #[test]
    fn bare_kinds_hide_cause(cause in "[0-9]{3,20}") {
        for err in [
            faults::with_not_found(cause.clone()),
            faults::with_permission_denied(cause.clone()),
            faults::with_unauthenticated(cause.clone()),
            faults::with_unimplemented(cause.clone()),
        ] {
            prop_assert!(!err.to_string().contains(&cause));
        }
    }

    /// Unavailable mentions the delay only when it is positive
    #[test]
    fn unavailable_delay_in_message(millis in 0u64..100_000) {
        let delay = Duration::from_millis(millis);
        let msg = faults::unavailable(delay).to_string();

        prop_assert!(msg.contains("unavailable"));
        prop_assert_eq!(msg.contains("retry in"), millis > 0);
        if millis > 0 {
            let expected = format!("{delay:?}");
            prop_assert!(msg.contains(&expected));
        }
    }

    /// Arbitrary text never breaks display or logging
    #[test]
    fn arbitrary_text_renders(text in "\\PC{0,2000}") {
        let err = faults::with_bad(text.clone(), [FieldViolation::new(text.clone(), text)]);

        let _ = err.to_string();
        let _ = format!("{err:?}");

        let mut line = String::new();
        err.log_entry().write_to(&mut line).unwrap();
        prop_assert!(line.len() < 4096);
    }

    /// Log entries stay on one line whatever the violation text contains
    #[test]
    fn log_entry_is_one_line(text in any::<String>()) {
        let err = faults::with_failed_precondition(
            text.clone(),
            [PreconditionViolation::new(text.clone(), text.clone(), text)],
        );

        let mut line = String::new();
        err.log_entry().write_to(&mut line).unwrap();
        prop_assert!(!line.contains('\n') && !line.contains('\r'));
        prop_assert_eq!(line.lines().count(), 1);
    }
}

// ============================================================================
// CONCURRENT PROPERTIES
// ============================================================================

proptest! {
    /// A shared fault can be classified and rendered from many threads
    #[test]
    fn concurrent_classification(
        kind in kind_strategy(),
        thread_count in 1usize..8,
    ) {
        let err = std::sync::Arc::new(wrap(kind, faults::NOT_FOUND, "shared"));
        let expected = err.to_string();

        let handles: Vec<_> = (0..thread_count)
            .map(|_| {
                let err = std::sync::Arc::clone(&err);
                std::thread::spawn(move || {
                    (
                        faults::is_kind(&*err, kind),
                        faults::is_not_found(&*err),
                        err.to_string(),
                    )
                })
            })
            .collect();

        for handle in handles {
            let (outer, inner, rendered) = handle.join().unwrap();
            prop_assert!(outer);
            prop_assert!(inner);
            prop_assert_eq!(&rendered, &expected);
        }
    }
}

#[test]
fn shared_constants_match_fresh_values() {
    assert!(faults::is_not_found(&faults::NOT_FOUND));
    assert!(faults::is_permission_denied(&faults::PERMISSION_DENIED));
    assert!(faults::is_unauthenticated(&faults::UNAUTHENTICATED));
    assert!(faults::is_unimplemented(&faults::UNIMPLEMENTED));

    let fresh = faults::with_not_found("row missing");
    assert_eq!(fresh.kind(), faults::NOT_FOUND.kind());
}

#[test]
fn documented_display_examples() {
    let err = faults::bad([FieldViolation::new("firstname", "Field required")]);
    assert_eq!(err.to_string(), "Field required");
    assert_eq!(faults::bad([]).to_string(), "bad request");

    let msg = faults::unavailable(Duration::from_secs(2)).to_string();
    assert!(msg.contains("unavailable") && msg.contains("2s"));
    assert!(!faults::unavailable(Duration::ZERO).to_string().contains("retry"));
}
