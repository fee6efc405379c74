use std::fmt;

use crate::sink::SinkError;

/// Errors that can occur while guarding a request.
///
/// None of these ever reach a request pipeline through the filter itself;
/// they surface only from the fallible building blocks
/// ([`ParsedUrl::try_parse`](crate::ParsedUrl::try_parse),
/// [`LogSink::write`](crate::LogSink::write)).
#[derive(Debug)]
pub enum Error {
    /// A URL could not be parsed
    Url(UrlParseError),
    /// A log sink rejected a record
    Sink(SinkError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Url(e) => write!(f, "URL error: {}", e),
            Error::Sink(e) => write!(f, "Log sink error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Url(e) => Some(e),
            Error::Sink(e) => Some(e),
        }
    }
}

impl From<UrlParseError> for Error {
    fn from(e: UrlParseError) -> Self {
        Error::Url(e)
    }
}

impl From<SinkError> for Error {
    fn from(e: SinkError) -> Self {
        Error::Sink(e)
    }
}

/// An internal path that could not be resolved against the parsing base.
///
/// The rejected input is not included in the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParseError {
    reason: url::ParseError,
}

impl UrlParseError {
    pub(crate) fn new(reason: url::ParseError) -> Self {
        Self { reason }
    }

    /// Returns the underlying parser error.
    pub fn reason(&self) -> url::ParseError {
        self.reason
    }
}

impl fmt::Display for UrlParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unparseable URL: {}", self.reason)
    }
}

impl std::error::Error for UrlParseError {}

impl From<url::ParseError> for UrlParseError {
    fn from(reason: url::ParseError) -> Self {
        Self::new(reason)
    }
}
