//! Extraction boundary trait for web integration.

use crate::context::RequestContext;

/// Builds a [`RequestContext`] from a framework-specific request.
///
/// Implementations decode the request's query string, body and cookies into
/// the four parameter sources. They must not sanitize anything themselves:
/// the returned context is unsanitized and goes through
/// [`RequestFilter`](crate::RequestFilter) next.
///
/// # Examples
///
/// ```
/// use request_guard::web::ExtractParams;
/// use request_guard::{parse_query, RequestContext, RequestParams};
///
/// struct MyFrameworkRequest {
///     id: String,
///     uri_query: String,
/// }
///
/// impl ExtractParams for MyFrameworkRequest {
///     fn extract_context(&self) -> RequestContext {
///         let params = RequestParams::new(
///             parse_query(&self.uri_query),
///             Default::default(),
///             Default::default(),
///         );
///         RequestContext::new(self.id.clone(), params)
///     }
/// }
/// ```
pub trait ExtractParams {
    /// Decodes the request into an unsanitized context.
    fn extract_context(&self) -> RequestContext;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_query;
    use crate::request::RequestParams;

    struct TestRequest {
        id: String,
        query: String,
    }

    impl ExtractParams for TestRequest {
        fn extract_context(&self) -> RequestContext {
            RequestContext::new(
                self.id.clone(),
                RequestParams::new(
                    parse_query(&self.query),
                    Default::default(),
                    Default::default(),
                ),
            )
        }
    }

    #[test]
    fn extract_context_trait_works() {
        let req = TestRequest {
            id: "test-1".to_string(),
            query: "a=1".to_string(),
        };

        let ctx = req.extract_context();
        assert_eq!(ctx.request_id(), "test-1");
        assert_eq!(ctx.params().query.len(), 1);
        assert_eq!(ctx.params().merged.len(), 1);
    }
}
