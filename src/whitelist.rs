use std::collections::BTreeSet;

/// Reserved-looking keys that are accepted anyway.
///
/// A whitelist is fixed once a [`RequestFilter`](crate::RequestFilter) is
/// built; every parameter source of a request is checked against the same
/// set. The default whitelist is empty.
///
/// # Examples
///
/// ```
/// use request_guard::Whitelist;
///
/// let whitelist: Whitelist = ["#ajax_token"].into_iter().collect();
/// assert!(whitelist.contains("#ajax_token"));
/// assert!(!whitelist.contains("#markup"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    keys: BTreeSet<String>,
}

impl Whitelist {
    /// Creates an empty whitelist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key. Returns `false` if it was already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    /// Returns `true` if `key` is exempt from removal.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Returns the number of exempt keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no keys are exempt.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates over exempt keys in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Whitelist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for Whitelist {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.keys.extend(iter.into_iter().map(Into::into));
    }
}
