//! Constructors and wrappers.
//!
//! Constructors create a fresh fault with no cause. Wrappers attach a
//! category to an existing error, which stays reachable through `source()`
//! for logging and for classification of inner categories.
//!
//! Nothing here validates its input or fails: violations and delays are
//! attached exactly as given. A wrapper's cause may itself be a [`Fault`];
//! the chain then carries several category layers.
//!
//! To build a fault around an optional cause, use the per-kind constructors
//! directly, e.g. `BadRequest::new(maybe_cause, violations)`.

use crate::failures::{
    AuthenticationFailure, AvailabilityFailure, BadRequest, ConflictFailure, MissingFailure,
    PermissionFailure, PreconditionFailure, QuotaFailure, UnimplementedFailure,
};
use crate::violations::{ConflictViolation, FieldViolation, PreconditionViolation, QuotaViolation};
use crate::{BoxError, Fault};
use std::time::Duration;

// ============================================================================
// Constructors
// ============================================================================

/// A bad request carrying `violations`.
pub fn bad<I>(violations: I) -> Fault
where
    I: IntoIterator<Item = FieldViolation>,
{
    Fault::Bad(BadRequest::new(None, violations))
}

/// A failed precondition carrying `violations`.
pub fn failed_precondition<I>(violations: I) -> Fault
where
    I: IntoIterator<Item = PreconditionViolation>,
{
    Fault::FailedPrecondition(PreconditionFailure::new(None, violations))
}

/// A conflict (aborted operation) carrying `violations`.
pub fn aborted<I>(violations: I) -> Fault
where
    I: IntoIterator<Item = ConflictViolation>,
{
    Fault::Aborted(ConflictFailure::new(None, violations))
}

/// A temporary unavailability. A zero `retry_delay` means no recommendation.
#[inline]
pub fn unavailable(retry_delay: Duration) -> Fault {
    Fault::Unavailable(AvailabilityFailure::new(None, retry_delay))
}

/// An exhausted quota carrying `violations`.
pub fn resource_exhausted<I>(violations: I) -> Fault
where
    I: IntoIterator<Item = QuotaViolation>,
{
    Fault::ResourceExhausted(QuotaFailure::new(None, violations))
}

// ============================================================================
// Wrappers
// ============================================================================

/// Wrap `cause` as a permission failure.
#[inline]
pub fn with_permission_denied(cause: impl Into<BoxError>) -> Fault {
    Fault::PermissionDenied(PermissionFailure::new(Some(cause.into())))
}

/// Wrap `cause` as an authentication failure.
#[inline]
pub fn with_unauthenticated(cause: impl Into<BoxError>) -> Fault {
    Fault::Unauthenticated(AuthenticationFailure::new(Some(cause.into())))
}

/// Wrap `cause` as a missing resource.
#[inline]
pub fn with_not_found(cause: impl Into<BoxError>) -> Fault {
    Fault::NotFound(MissingFailure::new(Some(cause.into())))
}

/// Wrap `cause` as a bad request carrying `violations`.
pub fn with_bad<I>(cause: impl Into<BoxError>, violations: I) -> Fault
where
    I: IntoIterator<Item = FieldViolation>,
{
    Fault::Bad(BadRequest::new(Some(cause.into()), violations))
}

/// Wrap `cause` as a failed precondition carrying `violations`.
pub fn with_failed_precondition<I>(cause: impl Into<BoxError>, violations: I) -> Fault
where
    I: IntoIterator<Item = PreconditionViolation>,
{
    Fault::FailedPrecondition(PreconditionFailure::new(Some(cause.into()), violations))
}

/// Wrap `cause` as a conflict carrying `violations`.
pub fn with_aborted<I>(cause: impl Into<BoxError>, violations: I) -> Fault
where
    I: IntoIterator<Item = ConflictViolation>,
{
    Fault::Aborted(ConflictFailure::new(Some(cause.into()), violations))
}

/// Wrap `cause` as a temporary unavailability.
#[inline]
pub fn with_unavailable(cause: impl Into<BoxError>, retry_delay: Duration) -> Fault {
    Fault::Unavailable(AvailabilityFailure::new(Some(cause.into()), retry_delay))
}

/// Wrap `cause` as an exhausted quota carrying `violations`.
pub fn with_resource_exhausted<I>(cause: impl Into<BoxError>, violations: I) -> Fault
where
    I: IntoIterator<Item = QuotaViolation>,
{
    Fault::ResourceExhausted(QuotaFailure::new(Some(cause.into()), violations))
}

/// Wrap `cause` as an unimplemented operation.
#[inline]
pub fn with_unimplemented(cause: impl Into<BoxError>) -> Fault {
    Fault::Unimplemented(UnimplementedFailure::new(Some(cause.into())))
}
