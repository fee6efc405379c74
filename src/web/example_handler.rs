//! Example handlers demonstrating web integration with the request guard.
//!
//! **These examples are for documentation and testing only.**
//! They show the intended call order without requiring HTTP infrastructure.

use crate::destination::DESTINATION_KEY;
use crate::filter::RequestFilter;
use crate::url_parser::ParsedUrl;

use super::{guard_request, ExtractParams};

/// Where a login-style form redirects after submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    /// Request ID for tracing
    pub request_id: String,
    /// Path to redirect to
    pub path: String,
    /// Whether the target came from a `destination` parameter
    pub from_destination: bool,
}

/// Resolves the redirect target of a form submission.
///
/// The request is guarded first; a `destination` that survives the filter is
/// parsed and its path used, otherwise `fallback` is.
///
/// # Examples
///
/// ```
/// use request_guard::web::{example_handler::handle_redirect, RequestAdapter};
/// use request_guard::RequestFilter;
///
/// let filter = RequestFilter::default();
///
/// let mut adapter = RequestAdapter::new("req-login-001");
/// adapter.add_query_param("destination", "node/7?tab=edit");
/// let target = handle_redirect(&filter, &adapter, "user");
/// assert_eq!(target.path, "node/7");
///
/// let mut adapter = RequestAdapter::new("req-login-002");
/// adapter.add_query_param("destination", "node?q[%23markup]=x");
/// let target = handle_redirect(&filter, &adapter, "user");
/// assert_eq!(target.path, "user");
/// ```
pub fn handle_redirect<R: ExtractParams + ?Sized>(
    filter: &RequestFilter,
    request: &R,
    fallback: &str,
) -> RedirectTarget {
    let guarded = guard_request(filter, request);
    let destination = guarded
        .context
        .params()
        .query
        .get(DESTINATION_KEY)
        .and_then(|value| value.as_str())
        .map(ParsedUrl::parse);

    match destination {
        Some(parsed) if !parsed.path.is_empty() => RedirectTarget {
            request_id: guarded.context.request_id().to_string(),
            path: parsed.path,
            from_destination: true,
        },
        _ => RedirectTarget {
            request_id: guarded.context.request_id().to_string(),
            path: fallback.to_string(),
            from_destination: false,
        },
    }
}

/// Returns the sorted top-level body field names after guarding.
///
/// # Examples
///
/// ```
/// use request_guard::web::{example_handler::handle_form_fields, RequestAdapter};
/// use request_guard::RequestFilter;
///
/// let mut adapter = RequestAdapter::new("req-form-001");
/// adapter.set_form_body("title=Hi&%23submit=x&body[%23format]=full_html");
///
/// let fields = handle_form_fields(&RequestFilter::default(), &adapter);
/// assert_eq!(fields, vec!["body", "title"]);
/// ```
pub fn handle_form_fields<R: ExtractParams + ?Sized>(
    filter: &RequestFilter,
    request: &R,
) -> Vec<String> {
    let guarded = guard_request(filter, request);
    guarded.context.params().body.keys().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::RequestAdapter;

    #[test]
    fn redirect_without_destination_uses_fallback() {
        let adapter = RequestAdapter::new("req-1");
        let target = handle_redirect(&RequestFilter::default(), &adapter, "front");

        assert_eq!(target.path, "front");
        assert!(!target.from_destination);
        assert_eq!(target.request_id, "req-1");
    }

    #[test]
    fn redirect_honors_legacy_path() {
        let mut adapter = RequestAdapter::new("req-2");
        adapter.add_query_param("destination", "index.php?q=admin/content");

        let target = handle_redirect(&RequestFilter::default(), &adapter, "front");

        assert_eq!(target.path, "admin/content");
        assert!(target.from_destination);
    }

    #[test]
    fn redirect_rejects_fragment_smuggling() {
        let mut adapter = RequestAdapter::new("req-3");
        adapter.add_query_param("destination", "node?#danger=1");

        let target = handle_redirect(&RequestFilter::default(), &adapter, "front");

        assert_eq!(target.path, "front");
    }

    #[test]
    fn whitelisted_destination_key_survives() {
        let filter = RequestFilter::builder().allow("#danger").build();
        let mut adapter = RequestAdapter::new("req-4");
        adapter.add_query_param("destination", "node?#danger=1");

        let target = handle_redirect(&filter, &adapter, "front");

        assert_eq!(target.path, "node");
        assert!(target.from_destination);
    }

    #[test]
    fn form_fields_are_sanitized() {
        let mut adapter = RequestAdapter::new("req-5");
        adapter.set_form_body("%23a=1&b=2");

        let fields = handle_form_fields(&RequestFilter::default(), &adapter);

        assert_eq!(fields, vec!["b"]);
    }
}
