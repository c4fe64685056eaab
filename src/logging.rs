//! Structured log entries for faults.
//!
//! This crate never emits log records itself. Boundary code that wants to
//! log a fault asks it for a [`FaultLog`]: a borrowed, structured view with
//! an explicit lifetime tied to the fault.
//!
//! - Fields are exposed individually for structured loggers
//! - [`FaultLog::write_to`] renders one line without intermediate buffers
//!   for the fixed parts
//! - Free-text fields are sanitized so a hostile description or a very deep
//!   cause chain cannot produce unbounded or multi-line output
//!
//! Line format:
//!
//! ```text
//! [Bad] retry=never violations=[email='Invalid email address'] cause='decode failed'
//! [FailedPrecondition] retry=after-state-change violations=[TOS/user:7='Not accepted']
//! [Unavailable] [RETRYABLE] retry=same-call retry_in=2s
//! ```
//!
//! # Field Sanitization
//!
//! Inside every free-text field, control characters (including line breaks)
//! are replaced with `?`, and `'` and `\` are backslash-escaped. A field
//! longer than 1024 bytes after escaping is cut on a character boundary and
//! marked with `...[TRUNCATED]`. An escape sequence is never split.

use crate::failures::CauseRef;
use crate::violations::Violation;
use crate::{FailureKind, Fault, RetryPolicy};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

/// Maximum length for any individual free-text field in formatted output
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Marker appended to clipped fields
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// One violation as seen by a logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggedViolation<'a> {
    /// Caller-defined category (the precondition type), when the record has one.
    pub category: Option<&'a str>,
    /// Field, resource or quota subject.
    pub subject: &'a str,
    /// Human-readable explanation.
    pub description: &'a str,
}

type LoggedViolations<'a> = SmallVec<[LoggedViolation<'a>; 4]>;

/// Structured log entry borrowing from a [`Fault`].
///
/// # Example
///
/// ```rust
/// use faults::FieldViolation;
///
/// let err = faults::bad([FieldViolation::new("email", "Invalid email address")]);
/// err.with_log_entry(|log| {
///     assert_eq!(log.kind(), faults::FailureKind::Bad);
///     assert_eq!(log.violations()[0].subject, "email");
///     assert_eq!(log.violations()[0].description, "Invalid email address");
/// });
/// ```
#[derive(Debug)]
pub struct FaultLog<'a> {
    kind: FailureKind,
    retry_delay: Option<Duration>,
    violations: LoggedViolations<'a>,
    cause: Option<CauseRef<'a>>,
}

fn logged<V: Violation>(violations: &[V]) -> LoggedViolations<'_> {
    violations
        .iter()
        .map(|v| LoggedViolation {
            category: v.category(),
            subject: v.subject(),
            description: v.description(),
        })
        .collect()
}

impl<'a> FaultLog<'a> {
    pub(crate) fn from_fault(fault: &'a Fault) -> Self {
        let violations = match fault {
            Fault::Bad(failure) => logged(failure.violations()),
            Fault::FailedPrecondition(failure) => logged(failure.violations()),
            Fault::Aborted(failure) => logged(failure.violations()),
            Fault::ResourceExhausted(failure) => logged(failure.violations()),
            _ => SmallVec::new(),
        };

        Self {
            kind: fault.kind(),
            retry_delay: fault.retry_delay(),
            violations,
            cause: fault.cause_ref(),
        }
    }

    /// Category of the logged fault.
    #[inline]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Retry guidance for the category.
    #[inline]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.kind.retry_policy()
    }

    /// Whether the identical call may be retried.
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Recommended retry delay, when the fault carries one.
    #[inline]
    pub const fn retry_delay(&self) -> Option<Duration> {
        self.retry_delay
    }

    /// Violations in insertion order, unsanitized.
    #[inline]
    pub fn violations(&self) -> &[LoggedViolation<'a>] {
        &self.violations
    }

    /// Underlying cause, unsanitized.
    #[inline]
    pub const fn cause_ref(&self) -> Option<CauseRef<'a>> {
        self.cause
    }

    /// Write the entry as one line. Free-text fields are sanitized.
    ///
    /// ```rust
    /// let err = faults::with_unavailable("pool drained", std::time::Duration::from_secs(2));
    /// let mut line = String::new();
    /// err.log_entry().write_to(&mut line).unwrap();
    /// assert_eq!(line, "[Unavailable] [RETRYABLE] retry=same-call retry_in=2s cause='pool drained'");
    /// ```
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "[{}]", self.kind)?;
        if self.is_retryable() {
            f.write_str(" [RETRYABLE]")?;
        }
        write!(f, " retry={}", self.retry_policy())?;

        if !self.violations.is_empty() {
            f.write_str(" violations=[")?;
            for (i, violation) in self.violations.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                if let Some(category) = violation.category {
                    write!(f, "{}/", sanitize_field(category))?;
                }
                write!(
                    f,
                    "{}='{}'",
                    sanitize_field(violation.subject),
                    sanitize_field(violation.description)
                )?;
            }
            f.write_str("]")?;
        }

        if let Some(delay) = self.retry_delay {
            write!(f, " retry_in={delay:?}")?;
        }

        if let Some(cause) = self.cause {
            write!(f, " cause='{}'", sanitize_field(&cause.to_string()))?;
        }

        Ok(())
    }
}

impl fmt::Display for FaultLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Replacement for `c` inside a quoted field, or `None` to keep it.
#[inline]
fn escape(c: char) -> Option<&'static str> {
    match c {
        '\'' => Some("\\'"),
        '\\' => Some("\\\\"),
        c if c.is_control() => Some("?"),
        _ => None,
    }
}

#[inline]
fn escaped_len(c: char) -> usize {
    escape(c).map_or(c.len_utf8(), str::len)
}

/// Escape `s` for a single-line quoted field and clip it to
/// `MAX_FIELD_OUTPUT_LEN` bytes, marking the cut. Borrows when nothing
/// changes.
fn sanitize_field(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN && s.chars().all(|c| escape(c).is_none()) {
        return Cow::Borrowed(s);
    }

    let total: usize = s.chars().map(escaped_len).sum();
    let budget = if total <= MAX_FIELD_OUTPUT_LEN {
        MAX_FIELD_OUTPUT_LEN
    } else {
        MAX_FIELD_OUTPUT_LEN - TRUNCATION_INDICATOR.len()
    };

    let mut out = String::with_capacity(total.min(MAX_FIELD_OUTPUT_LEN));
    for c in s.chars() {
        if out.len() + escaped_len(c) > budget {
            out.push_str(TRUNCATION_INDICATOR);
            break;
        }
        match escape(c) {
            Some(escaped) => out.push_str(escaped),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}
