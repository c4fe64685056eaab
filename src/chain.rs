//! Cause-chain walking, classification and extraction.
//!
//! A chain starts at any error and follows `source()` links until they run
//! out. Classification asks whether any [`Fault`] on the chain has a given
//! [`FailureKind`]; extraction returns the first (outermost) such fault.
//!
//! Matching compares kind discriminants only. Neither the violations nor the
//! cause of a matched node are inspected, so a freshly built empty fault and
//! a heavily decorated one of the same kind are the same category.
//!
//! # Accepted Inputs
//!
//! Every classifier and extractor takes `impl Into<Chain<'a>>`:
//!
//! - `&E` for any concrete `E: Error + 'static` (including `&Fault`),
//! - `&dyn Error` and `&(dyn Error + Send + Sync)`,
//! - `Option` of any of those; `None` classifies as nothing.
//!
//! ```rust
//! use faults::{FieldViolation, is_bad, is_not_found, as_not_found};
//!
//! let err = faults::with_bad(faults::NOT_FOUND, [FieldViolation::new("id", "Unknown id")]);
//!
//! assert!(is_bad(&err));
//! assert!(is_not_found(&err));
//! assert!(as_not_found(&err).is_some());
//! assert!(!is_bad(None::<&faults::Fault>));
//! ```

use crate::failures::{
    AuthenticationFailure, AvailabilityFailure, BadRequest, ConflictFailure, MissingFailure,
    PermissionFailure, PreconditionFailure, QuotaFailure, UnimplementedFailure,
};
use crate::{FailureKind, Fault};
use std::error::Error;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Iterator over an error and its transitive `source()` links.
///
/// Yields the starting error first. Chains are acyclic by construction: each
/// wrap adds one new owner on top of an existing chain.
#[derive(Clone, Copy, Default)]
pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Chain<'a> {
    /// Start a chain at `err`.
    #[inline]
    pub fn new(err: &'a (dyn Error + 'static)) -> Self {
        Self { next: Some(err) }
    }

    /// A chain with no links.
    #[inline]
    pub const fn empty() -> Self {
        Self { next: None }
    }

    /// Only the categorized links, outermost first.
    ///
    /// A link that is a `Box<Fault>` or `Arc<Fault>` counts as the fault it
    /// holds. Such links appear when an already boxed fault is handed to a
    /// wrapper, which boxes it once more.
    pub fn faults(self) -> impl Iterator<Item = &'a Fault> {
        self.filter_map(as_fault)
    }
}

/// The fault behind `link`, seeing through one level of `Box` or `Arc`.
fn as_fault<'a>(link: &'a (dyn Error + 'static)) -> Option<&'a Fault> {
    link.downcast_ref::<Fault>()
        .or_else(|| link.downcast_ref::<Box<Fault>>().map(|boxed| &**boxed))
        .or_else(|| link.downcast_ref::<Arc<Fault>>().map(|shared| &**shared))
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

impl std::fmt::Debug for Chain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries((*self).map(|link| link.to_string()))
            .finish()
    }
}

impl<'a, E> From<&'a E> for Chain<'a>
where
    E: Error + 'static,
{
    #[inline]
    fn from(err: &'a E) -> Self {
        Self::new(err)
    }
}

impl<'a> From<&'a (dyn Error + 'static)> for Chain<'a> {
    #[inline]
    fn from(err: &'a (dyn Error + 'static)) -> Self {
        Self::new(err)
    }
}

impl<'a> From<&'a (dyn Error + Send + Sync + 'static)> for Chain<'a> {
    #[inline]
    fn from(err: &'a (dyn Error + Send + Sync + 'static)) -> Self {
        Self::new(err)
    }
}

impl<'a, T> From<Option<T>> for Chain<'a>
where
    T: Into<Chain<'a>>,
{
    #[inline]
    fn from(err: Option<T>) -> Self {
        err.map_or_else(Chain::empty, Into::into)
    }
}

// ============================================================================
// Generic classification
// ============================================================================

/// First fault of `kind` on the chain, outermost first.
pub fn find<'a>(err: impl Into<Chain<'a>>, kind: FailureKind) -> Option<&'a Fault> {
    err.into().faults().find(|fault| fault.kind() == kind)
}

/// True if any fault on the chain has `kind`.
pub fn is_kind<'a>(err: impl Into<Chain<'a>>, kind: FailureKind) -> bool {
    find(err, kind).is_some()
}

/// Kind of the outermost fault on the chain, if any link is categorized.
pub fn kind_of<'a>(err: impl Into<Chain<'a>>) -> Option<FailureKind> {
    err.into().faults().next().map(Fault::kind)
}

// ============================================================================
// Per-kind classifiers and extractors
// ============================================================================

macro_rules! classify {
    ($(
        $variant:ident($failure:ty) => $is:ident, $as:ident;
    )+) => {
        $(
            #[doc = concat!("True if the chain contains a `", stringify!($variant), "` fault.")]
            #[inline]
            pub fn $is<'a>(err: impl Into<Chain<'a>>) -> bool {
                is_kind(err, FailureKind::$variant)
            }

            #[doc = concat!(
                "Outermost `", stringify!($variant), "` fault on the chain, with its payload."
            )]
            pub fn $as<'a>(err: impl Into<Chain<'a>>) -> Option<&'a $failure> {
                err.into().faults().find_map(|fault| match fault {
                    Fault::$variant(failure) => Some(failure),
                    _ => None,
                })
            }
        )+
    };
}

classify! {
    Unauthenticated(AuthenticationFailure) => is_unauthenticated, as_unauthenticated;
    PermissionDenied(PermissionFailure) => is_permission_denied, as_permission_denied;
    NotFound(MissingFailure) => is_not_found, as_not_found;
    Bad(BadRequest) => is_bad, as_bad;
    FailedPrecondition(PreconditionFailure) => is_failed_precondition, as_failed_precondition;
    Aborted(ConflictFailure) => is_aborted, as_aborted;
    Unavailable(AvailabilityFailure) => is_unavailable, as_unavailable;
    ResourceExhausted(QuotaFailure) => is_resource_exhausted, as_resource_exhausted;
    Unimplemented(UnimplementedFailure) => is_unimplemented, as_unimplemented;
}
