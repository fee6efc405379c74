//! Request adapter for mapping raw HTTP request parts to parameter sources.

use url::form_urlencoded;

use crate::context::RequestContext;
use crate::query::{parse_cookie_header, parse_query};
use crate::request::RequestParams;

use super::ExtractParams;

/// Owned raw parts of an HTTP request.
///
/// `RequestAdapter` is the framework-agnostic integration point: framework
/// code copies the raw query string, the form-encoded body and the `Cookie`
/// header into it, and the adapter decodes them into the four parameter
/// sources.
///
/// # Examples
///
/// ```
/// use request_guard::web::{ExtractParams, RequestAdapter};
///
/// let mut adapter = RequestAdapter::new("req-12345");
/// adapter.set_query_string("page=2&sort[field]=title");
/// adapter.set_form_body("title=Hello+world");
/// adapter.set_cookie_header("theme=dark");
///
/// let ctx = adapter.extract_context();
/// assert_eq!(ctx.request_id(), "req-12345");
/// assert!(ctx.params().query.contains_key("sort"));
/// assert!(ctx.params().merged.contains_key("title"));
/// assert!(ctx.params().cookies.contains_key("theme"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestAdapter {
    request_id: String,
    query_string: String,
    form_body: String,
    cookie_header: String,
}

impl RequestAdapter {
    /// Creates an adapter with the given request ID and no parameters.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            ..Self::default()
        }
    }

    /// Sets the raw query string (without the leading `?`).
    pub fn set_query_string(&mut self, raw: impl Into<String>) {
        self.query_string = raw.into();
    }

    /// Sets the raw `application/x-www-form-urlencoded` body.
    pub fn set_form_body(&mut self, raw: impl Into<String>) {
        self.form_body = raw.into();
    }

    /// Sets the raw `Cookie` header value.
    pub fn set_cookie_header(&mut self, raw: impl Into<String>) {
        self.cookie_header = raw.into();
    }

    /// Appends one query parameter, encoding key and value.
    pub fn add_query_param(&mut self, key: &str, value: &str) {
        append_pair(&mut self.query_string, key, value);
    }

    /// Appends one body parameter, encoding key and value.
    pub fn add_body_param(&mut self, key: &str, value: &str) {
        append_pair(&mut self.form_body, key, value);
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the raw query string.
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Decodes the raw parts into parameter sources.
    pub fn to_params(&self) -> RequestParams {
        RequestParams::new(
            parse_query(&self.query_string),
            parse_query(&self.form_body),
            parse_cookie_header(&self.cookie_header),
        )
    }
}

impl ExtractParams for RequestAdapter {
    fn extract_context(&self) -> RequestContext {
        RequestContext::new(self.request_id.clone(), self.to_params())
    }
}

fn append_pair(target: &mut String, key: &str, value: &str) {
    let encoded = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    if !target.is_empty() {
        target.push('&');
    }
    target.push_str(&encoded);
}
