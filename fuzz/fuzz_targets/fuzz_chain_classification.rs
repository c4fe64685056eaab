#![no_main]

use faults::{FailureKind, FieldViolation};
use libfuzzer_sys::fuzz_target;
use std::time::Duration;

// Each input byte picks one wrapping layer; classification must find every
// kind that was used and nothing else.
fuzz_target!(|data: &[u8]| {
    let mut err: faults::BoxError = "base".into();
    let mut used = Vec::new();

    for byte in data.iter().take(64) {
        let kind = FailureKind::ALL[usize::from(*byte) % FailureKind::ALL.len()];
        used.push(kind);
        err = Box::new(match kind {
            FailureKind::Unauthenticated => faults::with_unauthenticated(err),
            FailureKind::PermissionDenied => faults::with_permission_denied(err),
            FailureKind::NotFound => faults::with_not_found(err),
            FailureKind::Bad => faults::with_bad(err, [FieldViolation::new("f", "d")]),
            FailureKind::FailedPrecondition => faults::with_failed_precondition(err, []),
            FailureKind::Aborted => faults::with_aborted(err, []),
            FailureKind::Unavailable => faults::with_unavailable(err, Duration::ZERO),
            FailureKind::ResourceExhausted => faults::with_resource_exhausted(err, []),
            FailureKind::Unimplemented => faults::with_unimplemented(err),
        });
    }

    for kind in FailureKind::ALL {
        assert_eq!(faults::is_kind(&*err, kind), used.contains(&kind));
    }
    assert_eq!(faults::kind_of(&*err), used.last().copied());
});
