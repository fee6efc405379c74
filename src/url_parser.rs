//! Splitting of redirect targets into path, query and fragment.
//!
//! Targets come in two shapes: internal paths (`node/5?x=1#y`) and external
//! absolute URLs (`https://host/path?x=1#y`). Both are reduced to a
//! [`ParsedUrl`] whose query is decoded into a nested [`ParamMap`].

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::UrlParseError;
use crate::params::{ParamMap, ParamValue};
use crate::query::parse_query;

/// Base that internal paths are appended to before parsing.
///
/// Appending (rather than resolving a relative reference) keeps a leading
/// segment such as `foo:bar` from being read as a scheme.
const INTERNAL_BASE: &str = "http://example.com/";

/// Query key that carries the logical path when clean URLs are unavailable.
pub const LEGACY_PATH_KEY: &str = "q";

/// A path-or-URL split into its inspectable parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Path without query or fragment. For external URLs this includes the
    /// scheme and host verbatim.
    ///
    /// Internal paths are not raw: they are percent-decoded after the `url`
    /// crate resolves them, so `a%2Fb` becomes `a/b` and `x/../y` becomes
    /// `y`. Do not compare them against the raw request path.
    pub path: String,
    /// Decoded query parameters.
    pub query: ParamMap,
    /// Fragment without the leading `#`, or empty.
    pub fragment: String,
}

impl ParsedUrl {
    /// Parses an internal path or external URL, never failing.
    ///
    /// An internal path that cannot be parsed yields an empty `ParsedUrl`.
    ///
    /// # Examples
    ///
    /// ```
    /// use request_guard::{ParsedUrl, ParamValue};
    ///
    /// let parsed = ParsedUrl::parse("node/5?a=1&b[c]=2#frag");
    /// assert_eq!(parsed.path, "node/5");
    /// assert_eq!(parsed.query.get("a"), Some(&ParamValue::from("1")));
    /// assert_eq!(parsed.fragment, "frag");
    ///
    /// // A scalar `q` parameter overrides the path.
    /// let parsed = ParsedUrl::parse("https://example.com/a?q=foo&x=1#y");
    /// assert_eq!(parsed.path, "foo");
    /// assert!(!parsed.query.contains_key("q"));
    /// ```
    pub fn parse(input: &str) -> Self {
        match Self::try_parse(input) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(error = %err, "treating unparseable URL as empty");
                Self::default()
            }
        }
    }

    /// Parses an internal path or external URL.
    ///
    /// # Errors
    ///
    /// Returns `UrlParseError` if an internal path cannot be resolved against
    /// the parsing base. External URLs are split textually and never fail.
    pub fn try_parse(input: &str) -> Result<Self, UrlParseError> {
        let mut parsed = if is_external(input) {
            Self::split_external(input)
        } else {
            Self::resolve_internal(input)?
        };
        parsed.apply_legacy_path();
        Ok(parsed)
    }

    fn split_external(input: &str) -> Self {
        let Some((path, rest)) = input.split_once('?') else {
            return Self {
                path: input.to_string(),
                ..Self::default()
            };
        };

        let (query, fragment) = match rest.split_once('#') {
            Some((query, fragment)) => (query, fragment),
            None => (rest, ""),
        };

        Self {
            path: path.to_string(),
            query: parse_query(query),
            fragment: fragment.to_string(),
        }
    }

    fn resolve_internal(input: &str) -> Result<Self, UrlParseError> {
        let url = Url::parse(&format!("{INTERNAL_BASE}{input}"))?;

        let raw_path = url.path().strip_prefix('/').unwrap_or(url.path());
        let path = percent_decode_str(raw_path).decode_utf8_lossy().into_owned();

        Ok(Self {
            path,
            query: url.query().map(parse_query).unwrap_or_default(),
            fragment: url.fragment().unwrap_or_default().to_string(),
        })
    }

    /// Moves a scalar `q` query value into `path`.
    fn apply_legacy_path(&mut self) {
        if !matches!(self.query.get(LEGACY_PATH_KEY), Some(ParamValue::Scalar(_))) {
            return;
        }
        if let Some(ParamValue::Scalar(path)) = self.query.remove(LEGACY_PATH_KEY) {
            self.path = path;
        }
    }
}

/// Shorthand for [`ParsedUrl::parse`].
pub fn parse_url(input: &str) -> ParsedUrl {
    ParsedUrl::parse(input)
}

/// Returns `true` if `input` is treated as an absolute external URL.
pub fn is_external(input: &str) -> bool {
    input.contains("://")
}
