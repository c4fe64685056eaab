//! Structured violation records attached to detail-carrying faults.
//!
//! Violations are plain data: a subject (field, resource, quota subject...)
//! and a human-readable description. Their only behavior is a display form
//! `"<subject> - <description>"` and the [`Violation`] accessors the fault
//! renderers use.
//!
//! # Memory Hygiene
//!
//! Descriptions frequently echo rejected user input. Every record derives
//! `Zeroize` and `ZeroizeOnDrop`, so owned text is wiped when the record is
//! dropped rather than left behind in freed heap memory.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Common accessors over the four violation records.
pub trait Violation: fmt::Display {
    /// What the violation is about (field name, resource, quota subject).
    fn subject(&self) -> &str;

    /// Human-readable explanation, used when rendering fault messages.
    fn description(&self) -> &str;

    /// Caller-defined category qualifying the subject, if the record has one.
    #[inline]
    fn category(&self) -> Option<&str> {
        None
    }
}

macro_rules! subject_violation {
    (
        $(#[$meta:meta])*
        $name:ident { $subject:ident }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Zeroize, ZeroizeOnDrop)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            #[doc = concat!("The ", stringify!($subject), " this violation is about.")]
            pub $subject: String,
            /// Human-readable explanation.
            pub description: String,
        }

        impl $name {
            /// Build a violation from its subject and description.
            pub fn new($subject: impl Into<String>, description: impl Into<String>) -> Self {
                Self {
                    $subject: $subject.into(),
                    description: description.into(),
                }
            }
        }

        impl Violation for $name {
            #[inline]
            fn subject(&self) -> &str {
                &self.$subject
            }

            #[inline]
            fn description(&self) -> &str {
                &self.description
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} - {}", self.$subject, self.description)
            }
        }
    };
}

subject_violation! {
    /// A single bad field in a request, e.g. `firstname` / `Field required`.
    FieldViolation { field }
}

subject_violation! {
    /// A resource that conflicted with a concurrent operation.
    ConflictViolation { resource }
}

subject_violation! {
    /// One exhausted quota, e.g. `project:42` / `Daily export limit reached`.
    QuotaViolation { subject }
}

/// A precondition that was not met.
///
/// `type` is a caller-defined category such as `"TOS"`; `subject` names the
/// thing that failed the check, relative to that type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreconditionViolation {
    /// Precondition category.
    pub r#type: String,
    /// What failed the check.
    pub subject: String,
    /// Human-readable explanation.
    pub description: String,
}

impl PreconditionViolation {
    /// Build a precondition violation.
    pub fn new(
        r#type: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            r#type: r#type.into(),
            subject: subject.into(),
            description: description.into(),
        }
    }
}

impl Violation for PreconditionViolation {
    #[inline]
    fn subject(&self) -> &str {
        &self.subject
    }

    #[inline]
    fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    fn category(&self) -> Option<&str> {
        Some(&self.r#type)
    }
}

impl fmt::Display for PreconditionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.r#type, self.subject, self.description)
    }
}
