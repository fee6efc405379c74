use crate::request::RequestParams;

/// Per-request state threaded through the filter.
///
/// Holds the request id, the four parameter sources and the sanitized flag.
/// The flag lives here rather than in process-wide state so that pooled or
/// concurrent request handling never shares it between requests.
///
/// # Examples
///
/// ```
/// use request_guard::{parse_query, RequestContext, RequestParams};
///
/// let params = RequestParams::new(parse_query("a=1"), Default::default(), Default::default());
/// let ctx = RequestContext::new("req-1", params);
///
/// assert_eq!(ctx.request_id(), "req-1");
/// assert!(!ctx.is_sanitized());
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    params: RequestParams,
    sanitized: bool,
}

impl RequestContext {
    /// Creates an unsanitized context.
    pub fn new(request_id: impl Into<String>, params: RequestParams) -> Self {
        Self {
            request_id: request_id.into(),
            params,
            sanitized: false,
        }
    }

    /// Returns the request ID for this context.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the parameter sources.
    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    /// Returns the parameter sources mutably.
    pub fn params_mut(&mut self) -> &mut RequestParams {
        &mut self.params
    }

    /// Consumes the context, returning its parameter sources.
    pub fn into_params(self) -> RequestParams {
        self.params
    }

    /// Returns `true` once the sanitize pass has run for this request.
    pub fn is_sanitized(&self) -> bool {
        self.sanitized
    }

    /// Marks the sanitize pass as done. Only the filter sets this.
    pub(crate) fn mark_sanitized(&mut self) {
        self.sanitized = true;
    }
}
