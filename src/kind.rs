//! Failure kinds - the closed taxonomy every fault belongs to.
//!
//! A kind answers "what category of failure is this?" without looking at any
//! payload. Two faults of the same kind are the same category even when their
//! violations or causes differ, which is what classification relies on.
//!
//! # Retry Guidance
//!
//! Each kind carries a fixed [`RetryPolicy`]. The policy is advisory data for
//! callers deciding whether to retry; this crate never retries anything itself.
//!
//! | Kind | Policy |
//! |---|---|
//! | Unauthenticated | `AfterCredentials` |
//! | PermissionDenied | `Never` |
//! | NotFound | `AfterStateChange` |
//! | Bad | `Never` |
//! | FailedPrecondition | `AfterStateChange` |
//! | Aborted | `AtHigherLevel` |
//! | Unavailable | `SameCall` |
//! | ResourceExhausted | `AfterReplenish` |
//! | Unimplemented | `Never` |

use std::fmt;

// ============================================================================
// Failure Kind
// ============================================================================

/// The category a fault belongs to.
///
/// Kinds are small `Copy` values that can be returned from classification
/// and passed around freely. The set is closed, so `match` over it is
/// exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureKind {
    /// The request does not have valid authentication credentials.
    Unauthenticated,
    /// The caller is identified but not allowed to run the operation.
    PermissionDenied,
    /// Some requested entity was not found.
    NotFound,
    /// The request itself is malformed or invalid.
    Bad,
    /// The system is not in a state required for the operation.
    FailedPrecondition,
    /// The operation conflicted with a concurrent one.
    Aborted,
    /// The service is temporarily unable to handle the request.
    Unavailable,
    /// Some quota or resource has been exhausted.
    ResourceExhausted,
    /// The operation is not implemented or not supported.
    Unimplemented,
}

impl FailureKind {
    /// Every kind, in declaration order.
    pub const ALL: [FailureKind; 9] = [
        FailureKind::Unauthenticated,
        FailureKind::PermissionDenied,
        FailureKind::NotFound,
        FailureKind::Bad,
        FailureKind::FailedPrecondition,
        FailureKind::Aborted,
        FailureKind::Unavailable,
        FailureKind::ResourceExhausted,
        FailureKind::Unimplemented,
    ];

    /// Stable name of the kind. Zero-allocation.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            FailureKind::Unauthenticated => "Unauthenticated",
            FailureKind::PermissionDenied => "PermissionDenied",
            FailureKind::NotFound => "NotFound",
            FailureKind::Bad => "Bad",
            FailureKind::FailedPrecondition => "FailedPrecondition",
            FailureKind::Aborted => "Aborted",
            FailureKind::Unavailable => "Unavailable",
            FailureKind::ResourceExhausted => "ResourceExhausted",
            FailureKind::Unimplemented => "Unimplemented",
        }
    }

    /// Retry guidance attached to this kind.
    #[inline]
    pub const fn retry_policy(self) -> RetryPolicy {
        match self {
            FailureKind::Unauthenticated => RetryPolicy::AfterCredentials,
            FailureKind::PermissionDenied => RetryPolicy::Never,
            FailureKind::NotFound => RetryPolicy::AfterStateChange,
            FailureKind::Bad => RetryPolicy::Never,
            FailureKind::FailedPrecondition => RetryPolicy::AfterStateChange,
            FailureKind::Aborted => RetryPolicy::AtHigherLevel,
            FailureKind::Unavailable => RetryPolicy::SameCall,
            FailureKind::ResourceExhausted => RetryPolicy::AfterReplenish,
            FailureKind::Unimplemented => RetryPolicy::Never,
        }
    }

    /// True when the very same call may succeed if issued again later.
    #[inline]
    pub const fn is_retryable(self) -> bool {
        self.retry_policy().allows_same_call()
    }

    /// True for kinds that carry violation records.
    ///
    /// `Unavailable` carries retry info instead and reports false.
    #[inline]
    pub const fn has_violations(self) -> bool {
        matches!(
            self,
            FailureKind::Bad
                | FailureKind::FailedPrecondition
                | FailureKind::Aborted
                | FailureKind::ResourceExhausted
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Retry Policy
// ============================================================================

/// What a caller has to do before retrying a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RetryPolicy {
    /// Retrying cannot help; the request or the caller's rights must change.
    Never,
    /// Supply valid credentials, then retry.
    AfterCredentials,
    /// Retry only once the relevant state has been fixed or created.
    AfterStateChange,
    /// Restart the enclosing sequence (e.g. the whole transaction).
    AtHigherLevel,
    /// The same call is safe to retry, optionally after a delay.
    SameCall,
    /// Retry once the exhausted quota or resource has replenished.
    AfterReplenish,
}

impl RetryPolicy {
    /// Short lowercase label used in log lines.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            RetryPolicy::Never => "never",
            RetryPolicy::AfterCredentials => "after-credentials",
            RetryPolicy::AfterStateChange => "after-state-change",
            RetryPolicy::AtHigherLevel => "at-higher-level",
            RetryPolicy::SameCall => "same-call",
            RetryPolicy::AfterReplenish => "after-replenish",
        }
    }

    /// True when reissuing the identical call is a sensible strategy.
    #[inline]
    pub const fn allows_same_call(self) -> bool {
        matches!(self, RetryPolicy::SameCall | RetryPolicy::AfterReplenish)
    }
}

impl fmt::Display for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
