//! # Faults
//!
//! Semantic failure categories that survive any amount of error wrapping.
//!
//! ## Design Philosophy
//!
//! 1. **A closed taxonomy**: nine [`FailureKind`]s cover what a caller at a
//!    protocol boundary needs to know (not found, bad request, unavailable...)
//! 2. **Categories attach to causes**: wrapping a lower-level error adds a
//!    category without hiding the original error from diagnostics
//! 3. **Identity-based matching**: classification compares kinds only, never
//!    payloads, and looks at the whole `source()` chain
//! 4. **Typed recovery**: extractors hand back the structured payload
//!    (field violations, retry delay, quota subjects) of the outermost match
//!
//! ## Quick Start
//!
//! ```rust
//! use faults::{FieldViolation, Result};
//!
//! fn register(first_name: &str) -> Result<()> {
//!     if first_name.is_empty() {
//!         return Err(faults::bad([FieldViolation::new("firstname", "Field required")]));
//!     }
//!     Ok(())
//! }
//!
//! let err = register("").unwrap_err();
//! assert!(faults::is_bad(&err));
//! assert_eq!(err.to_string(), "Field required");
//!
//! let bad = faults::as_bad(&err).unwrap();
//! assert_eq!(bad.violations()[0].field, "firstname");
//! ```
//!
//! ## Wrapping Lower-Level Errors
//!
//! ```rust
//! use std::io;
//! use std::time::Duration;
//!
//! let io_err = io::Error::new(io::ErrorKind::NotFound, "users/42.json");
//! let err = faults::with_not_found(io_err);
//! let err = faults::with_unavailable(err, Duration::from_secs(1));
//!
//! // Every category on the chain is visible.
//! assert!(faults::is_unavailable(&err));
//! assert!(faults::is_not_found(&err));
//! assert_eq!(err.retry_delay(), Some(Duration::from_secs(1)));
//! ```
//!
//! ## At the Boundary
//!
//! The library does not map kinds to wire status codes. The conventional
//! mapping (NotFound→404, PermissionDenied→403, Unauthenticated→401,
//! Bad→400, FailedPrecondition→412, Aborted→409, Unavailable→503,
//! ResourceExhausted→429, Unimplemented→501) belongs to the HTTP or RPC
//! adapter, which uses [`kind_of`] or the `is_*` classifiers to pick a status
//! and the `as_*` extractors to fill in a structured body.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for kinds, retry info and violation records

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::error::Error;
use std::fmt;
use std::result;
use std::time::Duration;

pub mod chain;
pub mod construct;
pub mod convenience;
pub mod definitions;
pub mod failures;
pub mod kind;
pub mod logging;
pub mod violations;

pub use chain::*;
pub use construct::*;
pub use definitions::*;
pub use failures::*;
pub use kind::*;
pub use logging::*;
pub use violations::*;

/// Owned, thread-safe underlying error held as a fault's cause.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Type alias for Results using [`Fault`].
pub type Result<T> = result::Result<T, Fault>;

/// A categorized failure.
///
/// The variant is the [`FailureKind`]; the payload is the per-kind failure
/// value. A `Fault` is immutable once built and is the type that takes part
/// in `source()` chains, so classification and extraction find it behind any
/// number of wrapping layers.
///
/// # Display
///
/// Displays the per-kind message (see [`failures`]). `Debug` shows the
/// payload and cause.
#[must_use = "faults should be propagated or classified"]
#[derive(Debug)]
pub enum Fault {
    /// See [`AuthenticationFailure`].
    Unauthenticated(AuthenticationFailure),
    /// See [`PermissionFailure`].
    PermissionDenied(PermissionFailure),
    /// See [`MissingFailure`].
    NotFound(MissingFailure),
    /// See [`BadRequest`].
    Bad(BadRequest),
    /// See [`PreconditionFailure`].
    FailedPrecondition(PreconditionFailure),
    /// See [`ConflictFailure`].
    Aborted(ConflictFailure),
    /// See [`AvailabilityFailure`].
    Unavailable(AvailabilityFailure),
    /// See [`QuotaFailure`].
    ResourceExhausted(QuotaFailure),
    /// See [`UnimplementedFailure`].
    Unimplemented(UnimplementedFailure),
}

/// Runs `$body` with `$inner` bound to the payload of whichever variant
/// `$fault` is.
macro_rules! each_variant {
    ($fault:expr, $inner:ident => $body:expr) => {
        match $fault {
            Fault::Unauthenticated($inner) => $body,
            Fault::PermissionDenied($inner) => $body,
            Fault::NotFound($inner) => $body,
            Fault::Bad($inner) => $body,
            Fault::FailedPrecondition($inner) => $body,
            Fault::Aborted($inner) => $body,
            Fault::Unavailable($inner) => $body,
            Fault::ResourceExhausted($inner) => $body,
            Fault::Unimplemented($inner) => $body,
        }
    };
}

impl Fault {
    /// Kind of this fault. Fixed at construction.
    #[inline]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Fault::Unauthenticated(_) => FailureKind::Unauthenticated,
            Fault::PermissionDenied(_) => FailureKind::PermissionDenied,
            Fault::NotFound(_) => FailureKind::NotFound,
            Fault::Bad(_) => FailureKind::Bad,
            Fault::FailedPrecondition(_) => FailureKind::FailedPrecondition,
            Fault::Aborted(_) => FailureKind::Aborted,
            Fault::Unavailable(_) => FailureKind::Unavailable,
            Fault::ResourceExhausted(_) => FailureKind::ResourceExhausted,
            Fault::Unimplemented(_) => FailureKind::Unimplemented,
        }
    }

    /// True if this fault itself (not its chain) has `kind`.
    ///
    /// Use [`is_kind`] to look through causes as well.
    #[inline]
    pub const fn is(&self, kind: FailureKind) -> bool {
        self.kind() as u8 == kind as u8
    }

    /// Retry guidance for this fault's kind.
    #[inline]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.kind().retry_policy()
    }

    /// Recommended retry delay. Only `Unavailable` faults with a delay
    /// greater than zero carry one.
    #[inline]
    pub fn retry_delay(&self) -> Option<Duration> {
        match self {
            Fault::Unavailable(failure) => failure.retry_info().recommended(),
            _ => None,
        }
    }

    /// Underlying error this fault wraps, if any.
    #[inline]
    pub fn cause_ref(&self) -> Option<CauseRef<'_>> {
        each_variant!(self, inner => inner.cause_ref())
    }

    /// Give up the category and keep the underlying error.
    #[inline]
    pub fn into_cause(self) -> Option<BoxError> {
        each_variant!(self, inner => inner.into_cause())
    }

    /// Create a structured log entry borrowing from this fault.
    ///
    /// The entry cannot outlive the fault, so it has to be consumed by the
    /// logger right away.
    ///
    /// ```rust
    /// let err = faults::with_not_found(std::io::Error::other("row 7"));
    /// let mut line = String::new();
    /// err.log_entry().write_to(&mut line).unwrap();
    /// assert!(line.starts_with("[NotFound]"));
    /// assert!(line.contains("cause='row 7'"));
    /// ```
    #[inline]
    pub fn log_entry(&self) -> FaultLog<'_> {
        FaultLog::from_fault(self)
    }

    /// Callback form of [`Fault::log_entry`] for frameworks that need it.
    #[inline]
    pub fn with_log_entry<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&FaultLog<'_>) -> R,
    {
        let log = self.log_entry();
        f(&log)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        each_variant!(self, inner => fmt::Display::fmt(inner, f))
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause_ref().map(|cause| cause as &(dyn Error + 'static))
    }
}

macro_rules! fault_from {
    ($($failure:ident => $variant:ident),+ $(,)?) => {
        $(
            impl From<$failure> for Fault {
                #[inline]
                fn from(failure: $failure) -> Self {
                    Fault::$variant(failure)
                }
            }
        )+
    };
}

fault_from! {
    AuthenticationFailure => Unauthenticated,
    PermissionFailure => PermissionDenied,
    MissingFailure => NotFound,
    BadRequest => Bad,
    PreconditionFailure => FailedPrecondition,
    ConflictFailure => Aborted,
    AvailabilityFailure => Unavailable,
    QuotaFailure => ResourceExhausted,
    UnimplementedFailure => Unimplemented,
}
