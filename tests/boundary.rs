//! Boundary integration tests
//!
//! Exercises the crate the way an HTTP handler would: classify the outermost
//! fault to pick a status code, then pull violation detail and retry hints
//! into a JSON body.

use faults::{FailureKind, Fault, FieldViolation, QuotaViolation};
use serde_json::{Value, json};
use std::error::Error;
use std::fmt;
use std::io;
use std::time::Duration;

// ============================================================================
// Simulated handler
// ============================================================================

fn status_for(kind: FailureKind) -> u16 {
    match kind {
        FailureKind::NotFound => 404,
        FailureKind::PermissionDenied => 403,
        FailureKind::Unauthenticated => 401,
        FailureKind::Bad => 400,
        FailureKind::FailedPrecondition => 412,
        FailureKind::Aborted => 409,
        FailureKind::Unavailable => 503,
        FailureKind::ResourceExhausted => 429,
        FailureKind::Unimplemented => 501,
    }
}

/// Status and JSON body for any error. Uncategorized errors become 500 with
/// no detail leaked.
fn respond(err: &(dyn Error + 'static)) -> (u16, Value) {
    let Some(kind) = faults::kind_of(err) else {
        return (500, json!({ "error": "internal" }));
    };

    let mut body = json!({
        "error": kind.as_str(),
        "message": faults::find(err, kind).map(ToString::to_string),
    });

    if let Some(bad) = faults::as_bad(err) {
        body["violations"] = bad
            .violations()
            .iter()
            .map(|v| json!({ "field": v.field, "description": v.description }))
            .collect();
    }
    if let Some(quota) = faults::as_resource_exhausted(err) {
        body["violations"] = quota
            .violations()
            .iter()
            .map(|v| json!({ "subject": v.subject, "description": v.description }))
            .collect();
    }
    if let Some(delay) = faults::as_unavailable(err).and_then(|u| u.retry_info().recommended()) {
        body["retry_after_ms"] = json!(delay.as_millis() as u64);
    }

    (status_for(kind), body)
}

/// Foreign error type that wraps a fault, as a storage layer might.
#[derive(Debug)]
struct StorageError(Fault);

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage: {}", self.0)
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn every_kind_maps_to_a_status() {
    let cases = [
        (faults::NOT_FOUND, 404),
        (faults::PERMISSION_DENIED, 403),
        (faults::UNAUTHENTICATED, 401),
        (faults::bad([]), 400),
        (faults::failed_precondition([]), 412),
        (faults::aborted([]), 409),
        (faults::unavailable(Duration::ZERO), 503),
        (faults::resource_exhausted([]), 429),
        (faults::UNIMPLEMENTED, 501),
    ];

    for (fault, status) in &cases {
        let (got, body) = respond(fault);
        assert_eq!(got, *status, "{}", fault.kind());
        assert_eq!(body["error"], fault.kind().as_str());
    }
}

#[test]
fn uncategorized_error_is_internal() {
    let err = io::Error::other("disk on fire");
    let (status, body) = respond(&err);

    assert_eq!(status, 500);
    assert!(!body.to_string().contains("disk on fire"));
}

#[test]
fn validation_body_lists_violations() {
    let err = faults::bad([
        FieldViolation::new("firstname", "Field required"),
        FieldViolation::new("email", "Invalid email address"),
    ]);
    let (status, body) = respond(&err);

    assert_eq!(status, 400);
    assert_eq!(body["message"], "Field required. Invalid email address");
    assert_eq!(
        body["violations"],
        json!([
            { "field": "firstname", "description": "Field required" },
            { "field": "email", "description": "Invalid email address" },
        ])
    );
}

#[test]
fn outermost_category_picks_the_status() {
    let inner = faults::with_not_found(io::Error::from(io::ErrorKind::NotFound));
    let err = faults::with_resource_exhausted(inner, [QuotaViolation::new("tenant:7", "Out of credits")]);
    let (status, body) = respond(&err);

    assert_eq!(status, 429);
    assert_eq!(body["violations"][0]["subject"], "tenant:7");
    assert!(faults::is_not_found(&err));
}

#[test]
fn fault_behind_foreign_wrapper_is_found() {
    let err = StorageError(faults::with_unavailable(
        io::Error::from(io::ErrorKind::ConnectionRefused),
        Duration::from_millis(1500),
    ));
    let (status, body) = respond(&err);

    assert_eq!(status, 503);
    assert_eq!(body["retry_after_ms"], 1500);
}

#[test]
fn zero_delay_sends_no_retry_hint() {
    let (_, body) = respond(&faults::unavailable(Duration::ZERO));
    assert!(body.get("retry_after_ms").is_none());
}

#[test]
fn boxed_errors_from_question_mark_are_classified() {
    fn authorize(allowed: bool) -> faults::Result<()> {
        if allowed { Ok(()) } else { Err(faults::PERMISSION_DENIED) }
    }

    fn handler() -> Result<(), Box<dyn Error + Send + Sync>> {
        authorize(false)?;
        Ok(())
    }

    let err = handler().unwrap_err();
    let (status, _) = respond(&*err);
    assert_eq!(status, 403);
    assert!(faults::is_permission_denied(&*err));
}

#[cfg(feature = "serde")]
mod with_serde {
    use faults::{FailureKind, FieldViolation, PreconditionViolation, RetryInfo};
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn violation_records_serialize_directly() {
        let err = faults::bad([FieldViolation::new("email", "Invalid email address")]);
        let bad = faults::as_bad(&err).unwrap();

        let value = serde_json::to_value(bad.violations()).unwrap();
        assert_eq!(
            value,
            json!([{ "field": "email", "description": "Invalid email address" }])
        );
    }

    #[test]
    fn precondition_type_field_is_plain() {
        let v = PreconditionViolation::new("TOS", "user:7", "Not accepted");
        let value = serde_json::to_value(&v).unwrap();
        assert_eq!(value["type"], "TOS");

        let back: PreconditionViolation = serde_json::from_value(value).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn kind_and_retry_info_serialize() {
        assert_eq!(
            serde_json::to_value(FailureKind::ResourceExhausted).unwrap(),
            json!("ResourceExhausted")
        );
        let info = serde_json::to_value(RetryInfo::new(Duration::from_secs(2))).unwrap();
        assert_eq!(info["retry_delay"]["secs"], 2);
    }
}
