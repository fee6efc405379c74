//! Web framework integration surface.
//!
//! This module is the boundary between HTTP frameworks and the filter. It
//! handles:
//! - Decoding raw query strings, form bodies and cookie headers into the four
//!   parameter sources
//! - Building a per-request [`RequestContext`](crate::RequestContext)
//! - Running the sanitize pass and destination cleaning in order
//!
//! # Design Principles
//!
//! 1. **No Framework Dependencies**: This module contains no framework-specific code.
//!    Framework integrations implement [`ExtractParams`] or fill a [`RequestAdapter`].
//!
//! 2. **Filter Before Routing**: [`guard_request`] runs before any application
//!    code sees the parameters.
//!
//! 3. **Explicit Context**: No global state. The sanitized flag travels with the
//!    request context.
//!
//! # Example Flow
//!
//! ```
//! use request_guard::web::{guard_request, RequestAdapter};
//! use request_guard::RequestFilter;
//!
//! // Built once at startup and shared.
//! let filter = RequestFilter::builder().build();
//!
//! // Per request:
//! let mut adapter = RequestAdapter::new("req-001");
//! adapter.set_query_string("destination=node%3Fa%5B%2523markup%5D%3Dx");
//!
//! let guarded = guard_request(&filter, &adapter);
//! assert!(guarded.outcome.destination_removed);
//! ```

mod adapter;
pub mod example_handler;
mod extract;
mod middleware;

pub use adapter::RequestAdapter;
pub use extract::ExtractParams;
pub use middleware::{guard_context, guard_request, GuardedRequest};
