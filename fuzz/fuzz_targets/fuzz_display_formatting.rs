#![no_main]

use faults::{ConflictViolation, FieldViolation, PreconditionViolation, QuotaViolation};
use libfuzzer_sys::fuzz_target;
use std::time::Duration;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data).into_owned();
    let mid = text
        .char_indices()
        .nth(text.chars().count() / 2)
        .map_or(text.len(), |(i, _)| i);
    let (head, tail) = text.split_at(mid);

    let candidates = [
        faults::with_bad(text.clone(), [FieldViolation::new(head, tail)]),
        faults::with_failed_precondition(
            text.clone(),
            [PreconditionViolation::new(head, tail, text.as_str())],
        ),
        faults::with_aborted(text.clone(), [ConflictViolation::new(head, tail)]),
        faults::with_resource_exhausted(text.clone(), [QuotaViolation::new(head, tail)]),
        faults::with_unavailable(text.clone(), Duration::from_millis(data.len() as u64)),
        faults::with_not_found(text.clone()),
    ];

    for err in &candidates {
        let _ = err.to_string();
        let _ = format!("{err:?}");

        let mut line = String::new();
        err.log_entry().write_to(&mut line).unwrap();
        assert!(line.len() < 8192);
        assert!(!line.contains('\n'));
    }
});
