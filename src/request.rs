use std::fmt;

use crate::params::ParamMap;

/// One of the four parameter sources of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamSource {
    /// Query string parameters
    Query,
    /// Request body (form) parameters
    Body,
    /// Cookie parameters
    Cookie,
    /// Merged view over the other sources
    Merged,
}

impl ParamSource {
    /// All sources, in the order they are sanitized.
    pub const ALL: [ParamSource; 4] = [
        ParamSource::Query,
        ParamSource::Body,
        ParamSource::Cookie,
        ParamSource::Merged,
    ];

    /// Label used in log records.
    pub fn label(self) -> &'static str {
        match self {
            ParamSource::Query => "GET",
            ParamSource::Body => "POST",
            ParamSource::Cookie => "COOKIE",
            ParamSource::Merged => "REQUEST",
        }
    }
}

impl fmt::Display for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The parameter sources of one request.
///
/// `merged` is an independent map: callers decide how it is composed (see
/// [`RequestParams::merge_sources`]) and it is sanitized on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    /// Query string parameters
    pub query: ParamMap,
    /// Body parameters
    pub body: ParamMap,
    /// Cookie parameters
    pub cookies: ParamMap,
    /// Merged parameters
    pub merged: ParamMap,
}

impl RequestParams {
    /// Builds the sources, composing `merged` from query then body.
    pub fn new(query: ParamMap, body: ParamMap, cookies: ParamMap) -> Self {
        let merged = Self::merge_sources(&query, &body);
        Self {
            query,
            body,
            cookies,
            merged,
        }
    }

    /// Overlays `body` on `query`; body values win on key collisions.
    ///
    /// Cookies are not part of the merged view.
    pub fn merge_sources(query: &ParamMap, body: &ParamMap) -> ParamMap {
        let mut merged = query.clone();
        merged.extend(body.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    /// Returns the map for `source`.
    pub fn source(&self, source: ParamSource) -> &ParamMap {
        match source {
            ParamSource::Query => &self.query,
            ParamSource::Body => &self.body,
            ParamSource::Cookie => &self.cookies,
            ParamSource::Merged => &self.merged,
        }
    }

    /// Returns the map for `source` mutably.
    pub fn source_mut(&mut self, source: ParamSource) -> &mut ParamMap {
        match source {
            ParamSource::Query => &mut self.query,
            ParamSource::Body => &mut self.body,
            ParamSource::Cookie => &mut self.cookies,
            ParamSource::Merged => &mut self.merged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;
    use crate::query::parse_query;

    #[test]
    fn labels() {
        let labels: Vec<&str> = ParamSource::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["GET", "POST", "COOKIE", "REQUEST"]);
        assert_eq!(ParamSource::Cookie.to_string(), "COOKIE");
    }

    #[test]
    fn merged_prefers_body() {
        let params = RequestParams::new(
            parse_query("a=query&b=query"),
            parse_query("b=body&c=body"),
            parse_query("session=s"),
        );

        assert_eq!(params.merged.get("a"), Some(&ParamValue::from("query")));
        assert_eq!(params.merged.get("b"), Some(&ParamValue::from("body")));
        assert_eq!(params.merged.get("c"), Some(&ParamValue::from("body")));
        assert!(!params.merged.contains_key("session"));
    }

    #[test]
    fn source_accessors_match_fields() {
        let mut params = RequestParams::new(
            parse_query("q=1"),
            parse_query("b=1"),
            parse_query("c=1"),
        );

        assert!(params.source(ParamSource::Query).contains_key("q"));
        assert!(params.source(ParamSource::Body).contains_key("b"));
        assert!(params.source(ParamSource::Cookie).contains_key("c"));
        assert_eq!(params.source(ParamSource::Merged).len(), 2);

        params
            .source_mut(ParamSource::Cookie)
            .insert("d".to_string(), ParamValue::from("2"));
        assert_eq!(params.cookies.len(), 2);
    }
}
