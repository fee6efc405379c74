//! Request parameter guard against reserved-key injection.
//!
//! This crate filters request parameters before application code runs:
//! - **Reserved keys**: entries whose key starts with `#` are stripped from
//!   the query, body, cookie and merged parameter sources, at any depth
//! - **Redirect targets**: a `destination` query parameter whose own query
//!   string carries reserved keys is dropped entirely
//! - **Explicit context**: the "already sanitized" state travels with each
//!   request instead of living in process-wide state
//!
//! # Core Types
//!
//! - [`ParamValue`] / [`ParamMap`]: nested request parameters
//! - [`KeySanitizer`]: whitelist-aware recursive key stripping
//! - [`ParsedUrl`]: path/query/fragment split of internal paths and external URLs
//! - [`RequestFilter`]: configured pipeline (whitelist, logging, sink)
//! - [`RequestContext`]: per-request parameters and sanitized flag
//! - [`LogSink`]: best-effort destination for sanitization records
//!
//! # Examples
//!
//! ```
//! use request_guard::{parse_query, RequestContext, RequestFilter, RequestParams};
//!
//! let filter = RequestFilter::builder().build();
//!
//! let params = RequestParams::new(
//!     parse_query("name=alice&form[%23post_render][]=exec"),
//!     Default::default(),
//!     Default::default(),
//! );
//! let mut ctx = RequestContext::new("req-123", params);
//!
//! let report = filter.sanitize_once(&mut ctx);
//! assert_eq!(report.total_removed(), 2); // query and merged
//!
//! // A second pass over the same request is a no-op.
//! assert!(filter.sanitize_once(&mut ctx).was_skipped());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod destination;
mod error;
mod filter;
pub mod logging;
mod params;
mod query;
mod request;
mod sanitizer;
mod sink;
mod url_parser;
pub mod web;
mod whitelist;

#[cfg(test)]
mod test_utils;

pub use context::RequestContext;
pub use destination::{find_dangerous_keys, DESTINATION_KEY};
pub use error::{Error, UrlParseError};
pub use filter::{FilterOutcome, RequestFilter, RequestFilterBuilder, SanitizeReport};
pub use logging::{best_effort_log, RequestLog};
pub use params::{ParamMap, ParamValue};
pub use query::{parse_cookie_header, parse_query};
pub use request::{ParamSource, RequestParams};
pub use sanitizer::{is_reserved_key, KeySanitizer, RemovedKeys, RESERVED_SENTINEL};
pub use sink::{LogRecord, LogSink, MemorySink, SinkError, SinkErrorKind, TracingSink};
pub use url_parser::{is_external, parse_url, ParsedUrl, LEGACY_PATH_KEY};
pub use whitelist::Whitelist;
