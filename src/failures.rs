//! Per-kind failure values.
//!
//! There is one struct per [`FailureKind`](crate::FailureKind). Every struct
//! owns an optional cause; detail-carrying kinds also own their violations
//! (or, for `Unavailable`, a [`RetryInfo`]). Values are immutable: fields are
//! private and only read through accessors.
//!
//! Violations are held in a boxed slice, which keeps [`Fault`](crate::Fault)
//! small enough to return by value in a `Result`.
//!
//! These structs are what the `as_*` extractors hand back. They are unified
//! for propagation by [`Fault`](crate::Fault), which is the type that
//! implements `std::error::Error` and takes part in cause chains.
//!
//! # Message Rendering
//!
//! - Zero-detail kinds always render their fixed phrase. The cause is kept
//!   for chain walking but is not part of the message.
//! - Violation kinds render their descriptions joined with `". "`, or a
//!   fallback phrase when they carry none, followed by `": <cause>"` when a
//!   cause is present.
//! - `Unavailable` renders a fixed phrase plus the retry delay when it is
//!   greater than zero.

use crate::BoxError;
use crate::violations::{
    ConflictViolation, FieldViolation, PreconditionViolation, QuotaViolation, Violation,
};
use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Borrowed view of an owned cause.
pub type CauseRef<'a> = &'a (dyn Error + Send + Sync + 'static);

/// Render `violations` (or `fallback`) followed by the optional cause.
fn write_detail<V: Violation>(
    f: &mut fmt::Formatter<'_>,
    violations: &[V],
    fallback: &str,
    cause: Option<CauseRef<'_>>,
) -> fmt::Result {
    if violations.is_empty() {
        f.write_str(fallback)?;
    } else {
        for (i, violation) in violations.iter().enumerate() {
            if i > 0 {
                f.write_str(". ")?;
            }
            f.write_str(violation.description())?;
        }
    }

    if let Some(cause) = cause {
        write!(f, ": {cause}")?;
    }
    Ok(())
}

// ============================================================================
// Zero-detail failures
// ============================================================================

macro_rules! bare_failure {
    (
        $(#[$meta:meta])*
        $name:ident => $phrase:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name {
            cause: Option<BoxError>,
        }

        impl $name {
            /// Message rendered for every value of this kind.
            pub const MESSAGE: &'static str = $phrase;

            /// Build the failure around an optional cause.
            #[inline]
            pub const fn new(cause: Option<BoxError>) -> Self {
                Self { cause }
            }

            /// Underlying error, if this failure wraps one.
            #[inline]
            pub fn cause_ref(&self) -> Option<CauseRef<'_>> {
                self.cause.as_deref()
            }

            /// Give up the failure and keep its cause.
            #[inline]
            pub fn into_cause(self) -> Option<BoxError> {
                self.cause
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(Self::MESSAGE)
            }
        }
    };
}

bare_failure! {
    /// The request lacks valid authentication credentials.
    AuthenticationFailure => "failed to authenticate request"
}

bare_failure! {
    /// The caller is identified but lacks permission.
    ///
    /// Not for rejections caused by exhausting a resource (use
    /// `ResourceExhausted`), nor for unidentified callers (use
    /// `Unauthenticated`).
    PermissionFailure => "permission denied"
}

bare_failure! {
    /// Some requested entity was not found.
    MissingFailure => "resource not found"
}

bare_failure! {
    /// The operation is not implemented or not supported.
    UnimplementedFailure => "unimplemented (yet)"
}

// ============================================================================
// Violation-carrying failures
// ============================================================================

macro_rules! detail_failure {
    (
        $(#[$meta:meta])*
        $name:ident<$violation:ty> => $fallback:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name {
            cause: Option<BoxError>,
            violations: Box<[$violation]>,
        }

        impl $name {
            /// Message rendered when the failure carries no violations.
            pub const FALLBACK_MESSAGE: &'static str = $fallback;

            /// Build the failure from an optional cause and its violations.
            ///
            /// Violations keep the order they are yielded in.
            pub fn new<I>(cause: Option<BoxError>, violations: I) -> Self
            where
                I: IntoIterator<Item = $violation>,
            {
                Self {
                    cause,
                    violations: violations.into_iter().collect(),
                }
            }

            /// Attached violations, in insertion order.
            #[inline]
            pub fn violations(&self) -> &[$violation] {
                &self.violations
            }

            /// Underlying error, if this failure wraps one.
            #[inline]
            pub fn cause_ref(&self) -> Option<CauseRef<'_>> {
                self.cause.as_deref()
            }

            /// Give up the failure and keep its cause.
            #[inline]
            pub fn into_cause(self) -> Option<BoxError> {
                self.cause
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write_detail(f, &self.violations, Self::FALLBACK_MESSAGE, self.cause_ref())
            }
        }
    };
}

detail_failure! {
    /// The request is invalid; each field violation names one bad field.
    BadRequest<FieldViolation> => "bad request"
}

detail_failure! {
    /// The system is not in the state the operation requires.
    PreconditionFailure<PreconditionViolation> => "precondition failure"
}

detail_failure! {
    /// The operation was aborted because of a conflict, typically a
    /// concurrency issue such as a failed sequencer check.
    ConflictFailure<ConflictViolation> => "conflict"
}

detail_failure! {
    /// Some quota or resource has been exhausted.
    QuotaFailure<QuotaViolation> => "quota failure"
}

// ============================================================================
// Unavailable
// ============================================================================

/// How long a caller should wait before retrying.
///
/// A zero delay means "no recommendation".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetryInfo {
    /// Advisory wait before retrying.
    pub retry_delay: Duration,
}

impl RetryInfo {
    /// Wrap a retry delay.
    #[inline]
    pub const fn new(retry_delay: Duration) -> Self {
        Self { retry_delay }
    }

    /// The delay, or `None` when no recommendation was given.
    #[inline]
    pub fn recommended(&self) -> Option<Duration> {
        (!self.retry_delay.is_zero()).then_some(self.retry_delay)
    }
}

/// The service is temporarily unavailable; the same call may be retried.
#[derive(Debug, Default)]
pub struct AvailabilityFailure {
    cause: Option<BoxError>,
    retry_info: RetryInfo,
}

impl AvailabilityFailure {
    /// Message rendered for every value of this kind, before any delay hint.
    pub const MESSAGE: &'static str = "service temporarily unavailable";

    /// Build the failure from an optional cause and a retry delay.
    #[inline]
    pub const fn new(cause: Option<BoxError>, retry_delay: Duration) -> Self {
        Self {
            cause,
            retry_info: RetryInfo::new(retry_delay),
        }
    }

    /// Retry guidance carried by this failure.
    #[inline]
    pub fn retry_info(&self) -> RetryInfo {
        self.retry_info
    }

    /// Underlying error, if this failure wraps one.
    #[inline]
    pub fn cause_ref(&self) -> Option<CauseRef<'_>> {
        self.cause.as_deref()
    }

    /// Give up the failure and keep its cause.
    #[inline]
    pub fn into_cause(self) -> Option<BoxError> {
        self.cause
    }
}

impl fmt::Display for AvailabilityFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::MESSAGE)?;
        if let Some(delay) = self.retry_info.recommended() {
            write!(f, ", retry in {delay:?}")?;
        }
        Ok(())
    }
}
