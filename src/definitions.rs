//! Pre-defined faults for the zero-detail kinds.
//!
//! These kinds carry no payload, so the common no-cause case needs no
//! construction at all:
//!
//! ```rust
//! fn load(id: u64) -> faults::Result<String> {
//!     if id == 0 {
//!         return Err(faults::NOT_FOUND);
//!     }
//!     Ok(format!("item {id}"))
//! }
//!
//! let err = load(0).unwrap_err();
//! assert!(faults::is_not_found(&err));
//! ```
//!
//! The values are `const` items: immutable, free of resources, and safe to
//! use from any thread. Each use yields an identical value, so classification
//! treats them exactly like freshly constructed faults.

use crate::Fault;
use crate::failures::{
    AuthenticationFailure, MissingFailure, PermissionFailure, UnimplementedFailure,
};

/// The caller does not have permission to execute the operation.
///
/// Not for rejections caused by exhausting a resource (use
/// `resource_exhausted`) or for callers that cannot be identified (use
/// [`UNAUTHENTICATED`]).
pub const PERMISSION_DENIED: Fault = Fault::PermissionDenied(PermissionFailure::new(None));

/// The request does not have valid authentication credentials.
pub const UNAUTHENTICATED: Fault = Fault::Unauthenticated(AuthenticationFailure::new(None));

/// Some requested entity (e.g. a file or a row) was not found.
pub const NOT_FOUND: Fault = Fault::NotFound(MissingFailure::new(None));

/// The operation is not implemented or not supported.
pub const UNIMPLEMENTED: Fault = Fault::Unimplemented(UnimplementedFailure::new(None));
