use std::fmt;
use std::sync::Arc;

use crate::context::RequestContext;
use crate::destination::{find_dangerous_keys, DESTINATION_KEY};
use crate::logging::RequestLog;
use crate::request::ParamSource;
use crate::sanitizer::{KeySanitizer, RemovedKeys};
use crate::sink::{LogSink, TracingSink};
use crate::whitelist::Whitelist;

/// The request filter.
///
/// A `RequestFilter` holds the configuration shared by every request: the
/// whitelist, whether removed keys are logged, and the log sink. Per-request
/// state lives in [`RequestContext`], so one filter can serve any number of
/// requests concurrently.
///
/// # Examples
///
/// ```
/// use request_guard::{parse_query, RequestContext, RequestFilter, RequestParams};
///
/// let filter = RequestFilter::builder().build();
///
/// let params = RequestParams::new(
///     parse_query("page=2&#markup=x&destination=node%3F%2523danger%3D1"),
///     Default::default(),
///     Default::default(),
/// );
/// let mut ctx = RequestContext::new("req-123", params);
///
/// let outcome = filter.process(&mut ctx);
///
/// assert!(outcome.destination_removed);
/// assert!(!ctx.params().query.contains_key("#markup"));
/// assert!(!ctx.params().query.contains_key("destination"));
/// assert!(ctx.params().query.contains_key("page"));
/// ```
#[derive(Clone)]
pub struct RequestFilter {
    sanitizer: KeySanitizer,
    log_removed_keys: bool,
    sink: Arc<dyn LogSink>,
}

impl RequestFilter {
    /// Starts building a filter with an empty whitelist, key logging on, and
    /// a [`TracingSink`].
    pub fn builder() -> RequestFilterBuilder {
        RequestFilterBuilder::new()
    }

    /// Returns the sanitizer shared by all passes.
    pub fn sanitizer(&self) -> &KeySanitizer {
        &self.sanitizer
    }

    /// Returns the whitelist applied to every source.
    pub fn whitelist(&self) -> &Whitelist {
        self.sanitizer.whitelist()
    }

    /// Runs the full pipeline for one request.
    ///
    /// The sanitize pass runs first; destination cleaning follows when the
    /// query source carries a `destination` key.
    pub fn process(&self, ctx: &mut RequestContext) -> FilterOutcome {
        let report = self.sanitize_once(ctx);
        let destination_removed =
            ctx.params().query.contains_key(DESTINATION_KEY) && self.clean_destination(ctx);
        FilterOutcome {
            report,
            destination_removed,
        }
    }

    /// Strips reserved keys from all four parameter sources.
    ///
    /// Runs at most once per context: later calls return a skipped report
    /// and leave the parameters untouched. When key logging is enabled, each
    /// source with removals produces one warning record
    /// (`Sanitised GET - keys: #a, #b`).
    pub fn sanitize_once(&self, ctx: &mut RequestContext) -> SanitizeReport {
        let request_id = ctx.request_id().to_string();
        if ctx.is_sanitized() {
            tracing::debug!(request_id = %request_id, "sanitize pass already ran");
            return SanitizeReport::skipped();
        }

        let log = RequestLog::new(self.sink.as_ref(), &request_id);
        let mut report = SanitizeReport::new();

        for source in ParamSource::ALL {
            let removed = self.sanitizer.strip(ctx.params_mut().source_mut(source));
            if removed.is_empty() {
                continue;
            }
            if self.log_removed_keys {
                log.warn(format_args!("Sanitised {} - keys: {}", source, removed));
            }
            report.removed.push((source, removed));
        }

        ctx.mark_sanitized();
        report
    }

    /// Drops the `destination` parameter if its query carries dangerous keys.
    ///
    /// The key is removed from the query source. The merged source falls
    /// back to the body's `destination` if there is one, otherwise the key is
    /// removed there too. One warning record lists the offending keys.
    /// Returns `true` if the parameter was removed. A missing or non-scalar
    /// `destination` is left alone.
    pub fn clean_destination(&self, ctx: &mut RequestContext) -> bool {
        let Some(destination) = ctx
            .params()
            .query
            .get(DESTINATION_KEY)
            .and_then(|value| value.as_str())
        else {
            return false;
        };

        let dangerous = find_dangerous_keys(&self.sanitizer, destination);
        if dangerous.is_empty() {
            return false;
        }

        let params = ctx.params_mut();
        params.query.remove(DESTINATION_KEY);
        match params.body.get(DESTINATION_KEY).cloned() {
            Some(from_body) => {
                params.merged.insert(DESTINATION_KEY.to_string(), from_body);
            }
            None => {
                params.merged.remove(DESTINATION_KEY);
            }
        }

        let log = RequestLog::new(self.sink.as_ref(), ctx.request_id());
        log.warn(format_args!(
            "Removed destination parameter - dangerous keys: {}",
            dangerous
        ));
        true
    }
}

impl fmt::Debug for RequestFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestFilter")
            .field("sanitizer", &self.sanitizer)
            .field("log_removed_keys", &self.log_removed_keys)
            .finish_non_exhaustive()
    }
}

impl Default for RequestFilter {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`RequestFilter`].
///
/// # Examples
///
/// ```
/// use request_guard::{MemorySink, RequestFilter};
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let filter = RequestFilter::builder()
///     .allow("#ajax_token")
///     .log_removed_keys(true)
///     .shared_sink(sink.clone())
///     .build();
///
/// assert!(filter.whitelist().contains("#ajax_token"));
/// ```
pub struct RequestFilterBuilder {
    whitelist: Whitelist,
    log_removed_keys: bool,
    sink: Option<Arc<dyn LogSink>>,
}

impl RequestFilterBuilder {
    fn new() -> Self {
        Self {
            whitelist: Whitelist::new(),
            log_removed_keys: true,
            sink: None,
        }
    }

    /// Exempts every key in `keys`.
    pub fn whitelist<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist.extend(keys);
        self
    }

    /// Exempts a single key.
    pub fn allow(mut self, key: impl Into<String>) -> Self {
        self.whitelist.insert(key);
        self
    }

    /// Sets whether sanitize-pass removals are logged. Defaults to `true`.
    ///
    /// Destination removals are always logged.
    pub fn log_removed_keys(mut self, enabled: bool) -> Self {
        self.log_removed_keys = enabled;
        self
    }

    /// Sets the log sink.
    pub fn sink(self, sink: impl LogSink + 'static) -> Self {
        self.shared_sink(Arc::new(sink))
    }

    /// Sets a log sink that the caller keeps a handle to.
    pub fn shared_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Builds the filter.
    pub fn build(self) -> RequestFilter {
        RequestFilter {
            sanitizer: KeySanitizer::new(self.whitelist),
            log_removed_keys: self.log_removed_keys,
            sink: self.sink.unwrap_or_else(|| Arc::new(TracingSink)),
        }
    }
}

/// Keys removed from each source by one sanitize pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    skipped: bool,
    removed: Vec<(ParamSource, RemovedKeys)>,
}

impl SanitizeReport {
    fn new() -> Self {
        Self::default()
    }

    fn skipped() -> Self {
        Self {
            skipped: true,
            removed: Vec::new(),
        }
    }

    /// Returns `true` if the pass did not run because the context was
    /// already sanitized.
    pub fn was_skipped(&self) -> bool {
        self.skipped
    }

    /// Returns `true` if nothing was removed from any source.
    pub fn is_clean(&self) -> bool {
        self.removed.is_empty()
    }

    /// Returns the keys removed from `source`, if any.
    pub fn removed_from(&self, source: ParamSource) -> Option<&RemovedKeys> {
        self.removed
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, keys)| keys)
    }

    /// Iterates over sources with removals, in sanitize order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamSource, &RemovedKeys)> {
        self.removed.iter().map(|(source, keys)| (*source, keys))
    }

    /// Total number of removed keys across all sources.
    pub fn total_removed(&self) -> usize {
        self.removed.iter().map(|(_, keys)| keys.len()).sum()
    }
}

/// Result of [`RequestFilter::process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Sanitize pass results
    pub report: SanitizeReport,
    /// Whether the `destination` parameter was dropped
    pub destination_removed: bool,
}
