//! Convenience macros for building detail-carrying faults.
//!
//! Each macro expands to the matching constructor with the listed violations,
//! in order. An empty invocation builds the empty-violation fault.
//!
//! ```rust
//! use faults::{bad, failed_precondition};
//!
//! let err = bad!(
//!     "firstname" => "Field required",
//!     "email" => "Invalid email address",
//! );
//! assert_eq!(err.to_string(), "Field required. Invalid email address");
//!
//! let err = failed_precondition!("TOS", "user:7" => "Terms of service not accepted");
//! assert!(faults::is_failed_precondition(&err));
//!
//! assert_eq!(bad!().to_string(), "bad request");
//! ```

/// Build a `Bad` fault from `field => description` pairs.
#[macro_export]
macro_rules! bad {
    () => {
        $crate::bad(::core::iter::empty())
    };
    ($($field:expr => $description:expr),+ $(,)?) => {
        $crate::bad([$($crate::FieldViolation::new($field, $description)),+])
    };
}

/// Build an `Aborted` fault from `resource => description` pairs.
#[macro_export]
macro_rules! aborted {
    () => {
        $crate::aborted(::core::iter::empty())
    };
    ($($resource:expr => $description:expr),+ $(,)?) => {
        $crate::aborted([$($crate::ConflictViolation::new($resource, $description)),+])
    };
}

/// Build a `ResourceExhausted` fault from `subject => description` pairs.
#[macro_export]
macro_rules! resource_exhausted {
    () => {
        $crate::resource_exhausted(::core::iter::empty())
    };
    ($($subject:expr => $description:expr),+ $(,)?) => {
        $crate::resource_exhausted([$($crate::QuotaViolation::new($subject, $description)),+])
    };
}

/// Build a `FailedPrecondition` fault from `type, subject => description`
/// entries separated by `;`.
#[macro_export]
macro_rules! failed_precondition {
    () => {
        $crate::failed_precondition(::core::iter::empty())
    };
    ($($kind:expr, $subject:expr => $description:expr);+ $(;)?) => {
        $crate::failed_precondition([
            $($crate::PreconditionViolation::new($kind, $subject, $description)),+
        ])
    };
}
