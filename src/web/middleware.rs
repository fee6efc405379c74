//! Request guard entry points for web integrations.
//!
//! ```text
//! HTTP Request
//!   ↓
//! Framework-specific code implements ExtractParams (or fills a RequestAdapter)
//!   ↓
//! guard_request(&filter, &request)
//!   ↓
//! sanitize pass (once per context), then destination cleaning
//!   ↓
//! GuardedRequest handed to routing / application code
//! ```

use crate::context::RequestContext;
use crate::filter::{FilterOutcome, RequestFilter};

use super::ExtractParams;

/// A request whose parameters have been through the filter.
#[derive(Debug, Clone)]
pub struct GuardedRequest {
    /// The sanitized context
    pub context: RequestContext,
    /// What the filter removed
    pub outcome: FilterOutcome,
}

/// Extracts a context from `request` and runs the filter over it.
///
/// # Examples
///
/// ```
/// use request_guard::web::{guard_request, RequestAdapter};
/// use request_guard::RequestFilter;
///
/// let filter = RequestFilter::default();
/// let mut adapter = RequestAdapter::new("req-public");
/// adapter.set_query_string("search=rust&%23markup=x");
///
/// let guarded = guard_request(&filter, &adapter);
///
/// assert!(guarded.context.is_sanitized());
/// assert!(guarded.context.params().query.contains_key("search"));
/// assert!(!guarded.context.params().query.contains_key("#markup"));
/// ```
pub fn guard_request<R: ExtractParams + ?Sized>(
    filter: &RequestFilter,
    request: &R,
) -> GuardedRequest {
    guard_context(filter, request.extract_context())
}

/// Runs the filter over an already extracted context.
///
/// A context that was sanitized earlier in the pipeline is not sanitized
/// again; destination cleaning still runs.
pub fn guard_context(filter: &RequestFilter, mut context: RequestContext) -> GuardedRequest {
    let outcome = filter.process(&mut context);
    GuardedRequest { context, outcome }
}
