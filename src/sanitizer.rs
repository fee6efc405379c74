use std::fmt;

use crate::params::{ParamMap, ParamValue};
use crate::whitelist::Whitelist;

/// First character of a reserved key.
///
/// Keys starting with this character address framework-internal structure
/// (render directives and similar) and are never legitimate external input.
pub const RESERVED_SENTINEL: char = '#';

/// Returns `true` if `key` starts with [`RESERVED_SENTINEL`].
///
/// The empty key is never reserved.
///
/// # Examples
///
/// ```
/// use request_guard::is_reserved_key;
///
/// assert!(is_reserved_key("#markup"));
/// assert!(!is_reserved_key("markup"));
/// assert!(!is_reserved_key(""));
/// ```
pub fn is_reserved_key(key: &str) -> bool {
    key.starts_with(RESERVED_SENTINEL)
}

/// Ordered record of keys removed during one traversal.
///
/// Only key names are recorded, never the removed values, so the record is
/// safe to write to a log. Nested keys are recorded by their own name without
/// the path leading to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovedKeys {
    keys: Vec<String>,
}

impl RemovedKeys {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key.
    pub fn push(&mut self, key: impl Into<String>) {
        self.keys.push(key.into());
    }

    /// Appends all keys of another record, keeping their order.
    pub fn append(&mut self, other: RemovedKeys) {
        self.keys.extend(other.keys);
    }

    /// Returns `true` if nothing was removed.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the number of removed keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns the removed keys in traversal order.
    pub fn as_slice(&self) -> &[String] {
        &self.keys
    }

    /// Returns `true` if `key` was removed.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }
}

/// Keys joined with `", "`.
impl fmt::Display for RemovedKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keys.join(", "))
    }
}

/// Recursively strips reserved keys from nested request parameters.
///
/// A key is dangerous when it is reserved (see [`is_reserved_key`]) and not
/// listed in the sanitizer's [`Whitelist`]. Dangerous entries are removed
/// together with everything below them; every other nested value is walked
/// recursively. Scalars are never touched.
///
/// Stripping is idempotent: removing entries cannot create new reserved keys,
/// so a second pass over the same map removes nothing.
///
/// # Examples
///
/// ```
/// use request_guard::{parse_query, KeySanitizer};
///
/// let sanitizer = KeySanitizer::default();
/// let mut params = parse_query("name=alice&#markup=x&form[#type]=y&form[title]=z");
///
/// let removed = sanitizer.strip(&mut params);
///
/// assert_eq!(removed.to_string(), "#markup, #type");
/// assert!(params.contains_key("name"));
/// assert!(!params.contains_key("#markup"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeySanitizer {
    whitelist: Whitelist,
}

impl KeySanitizer {
    /// Creates a sanitizer that exempts the given keys.
    pub fn new(whitelist: Whitelist) -> Self {
        Self { whitelist }
    }

    /// Returns the exempt keys.
    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    /// Returns `true` if an entry with this key must be removed.
    pub fn is_dangerous(&self, key: &str) -> bool {
        is_reserved_key(key) && !self.whitelist.contains(key)
    }

    /// Removes dangerous keys from `params` at any depth.
    ///
    /// Returns the removed key names in traversal order.
    pub fn strip(&self, params: &mut ParamMap) -> RemovedKeys {
        let mut removed = RemovedKeys::new();
        self.strip_into(params, &mut removed);
        removed
    }

    /// Like [`strip`](Self::strip), appending to an existing record.
    pub fn strip_into(&self, params: &mut ParamMap, removed: &mut RemovedKeys) {
        params.retain(|key, value| {
            if self.is_dangerous(key) {
                removed.push(key.as_str());
                return false;
            }
            if let ParamValue::Nested(child) = value {
                self.strip_into(child, removed);
            }
            true
        });
    }

    /// Sanitizes an arbitrary value and returns it.
    ///
    /// Nested sets are stripped in place; scalars come back unchanged.
    pub fn strip_value(&self, mut value: ParamValue, removed: &mut RemovedKeys) -> ParamValue {
        if let ParamValue::Nested(map) = &mut value {
            self.strip_into(map, removed);
        }
        value
    }

    /// Reports the keys [`strip`](Self::strip) would remove, without
    /// modifying `params`.
    pub fn dangerous_keys(&self, params: &ParamMap) -> RemovedKeys {
        let mut found = RemovedKeys::new();
        self.collect_dangerous(params, &mut found);
        found
    }

    fn collect_dangerous(&self, params: &ParamMap, found: &mut RemovedKeys) {
        for (key, value) in params {
            if self.is_dangerous(key) {
                found.push(key.as_str());
            } else if let ParamValue::Nested(child) = value {
                self.collect_dangerous(child, found);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_query;

    fn nested(pairs: Vec<(&str, ParamValue)>) -> ParamValue {
        ParamValue::Nested(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn reserved_key_predicate() {
        assert!(is_reserved_key("#"));
        assert!(is_reserved_key("#post_render"));
        assert!(!is_reserved_key("post#render"));
        assert!(!is_reserved_key(" #markup"));
        assert!(!is_reserved_key(""));
    }

    #[test]
    fn strips_top_level_reserved_keys() {
        let sanitizer = KeySanitizer::default();
        let mut params = parse_query("#markup=x&safe=1");

        let removed = sanitizer.strip(&mut params);

        assert_eq!(removed.as_slice(), ["#markup".to_string()]);
        assert_eq!(params.len(), 1);
        assert!(params.contains_key("safe"));
    }

    #[test]
    fn strips_nested_reserved_keys() {
        let sanitizer = KeySanitizer::default();
        let mut params = parse_query("a[b][#c]=1&a[b][d]=2&a[#e][f]=3");

        let removed = sanitizer.strip(&mut params);

        assert_eq!(removed.len(), 2);
        assert!(removed.contains("#c"));
        assert!(removed.contains("#e"));

        let a = params.get("a").and_then(ParamValue::as_map).expect("a kept");
        assert!(!a.contains_key("#e"));
        let b = a.get("b").and_then(ParamValue::as_map).expect("b kept");
        assert!(!b.contains_key("#c"));
        assert_eq!(b.get("d"), Some(&ParamValue::from("2")));
    }

    #[test]
    fn removed_subtree_is_not_walked() {
        let sanitizer = KeySanitizer::default();
        let mut params = parse_query("#outer[#inner]=1");

        let removed = sanitizer.strip(&mut params);

        assert_eq!(removed.as_slice(), ["#outer".to_string()]);
        assert!(params.is_empty());
    }

    #[test]
    fn whitelisted_keys_survive_at_any_depth() {
        let sanitizer = KeySanitizer::new(["#token"].into_iter().collect());
        let mut params = parse_query("#token=1&form[#token]=2&form[#markup]=3");

        let removed = sanitizer.strip(&mut params);

        assert_eq!(removed.as_slice(), ["#markup".to_string()]);
        assert!(params.contains_key("#token"));
        let form = params.get("form").and_then(ParamValue::as_map).expect("form");
        assert!(form.contains_key("#token"));
    }

    #[test]
    fn whitelisted_subtree_is_still_walked() {
        let sanitizer = KeySanitizer::new(["#ok"].into_iter().collect());
        let mut params = parse_query("#ok[#bad]=1&#ok[fine]=2");

        let removed = sanitizer.strip(&mut params);

        assert_eq!(removed.as_slice(), ["#bad".to_string()]);
        let ok = params.get("#ok").and_then(ParamValue::as_map).expect("kept");
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn empty_key_is_never_removed() {
        let sanitizer = KeySanitizer::default();
        let mut params = ParamMap::new();
        params.insert(String::new(), ParamValue::from("x"));
        params.insert("a".to_string(), nested(vec![("", ParamValue::from("y"))]));

        let removed = sanitizer.strip(&mut params);

        assert!(removed.is_empty());
        assert!(params.contains_key(""));
        assert!(params.get("a").and_then(|a| a.get("")).is_some());
    }

    #[test]
    fn strip_is_idempotent() {
        let sanitizer = KeySanitizer::default();
        let mut params = parse_query("a=1&#b=2&c[#d]=3&c[e][#f]=4&c[e][g]=5");

        let first = sanitizer.strip(&mut params);
        let snapshot = params.clone();
        let second = sanitizer.strip(&mut params);

        assert_eq!(first.len(), 3);
        assert!(second.is_empty());
        assert_eq!(params, snapshot);
    }

    #[test]
    fn scalar_value_passes_through() {
        let sanitizer = KeySanitizer::default();
        let mut removed = RemovedKeys::new();

        let value = sanitizer.strip_value(ParamValue::from("#not-a-key"), &mut removed);

        assert_eq!(value, ParamValue::from("#not-a-key"));
        assert!(removed.is_empty());
    }

    #[test]
    fn strip_value_on_nested() {
        let sanitizer = KeySanitizer::default();
        let mut removed = RemovedKeys::new();
        let value = nested(vec![
            ("#x", ParamValue::from("1")),
            ("y", ParamValue::from("2")),
        ]);

        let value = sanitizer.strip_value(value, &mut removed);

        assert_eq!(value, nested(vec![("y", ParamValue::from("2"))]));
        assert_eq!(removed.to_string(), "#x");
    }

    #[test]
    fn dangerous_keys_does_not_mutate() {
        let sanitizer = KeySanitizer::default();
        let params = parse_query("a[#b]=1&#c=2");

        let found = sanitizer.dangerous_keys(&params);

        assert_eq!(found.len(), 2);
        assert!(params.contains_key("#c"));
        let mut copy = params.clone();
        assert_eq!(sanitizer.strip(&mut copy), found);
    }

    #[test]
    fn removed_keys_display() {
        let mut removed = RemovedKeys::new();
        assert_eq!(removed.to_string(), "");
        removed.push("#a");
        removed.push("#b");
        assert_eq!(format!("{}", removed), "#a, #b");

        let mut more = RemovedKeys::new();
        more.push("#c");
        removed.append(more);
        assert_eq!(removed.to_string(), "#a, #b, #c");
    }

    mod proptests {
        use super::*;
        use crate::test_utils::{arb_param_map, has_dangerous_key};
        use proptest::prelude::*;

        proptest! {
            /// Property: nothing reserved survives unless whitelisted
            #[test]
            fn proptest_no_reserved_key_survives(mut params in arb_param_map()) {
                let whitelist: Whitelist = ["#keep"].into_iter().collect();
                let sanitizer = KeySanitizer::new(whitelist.clone());

                sanitizer.strip(&mut params);

                prop_assert!(!has_dangerous_key(&params, &whitelist));
            }

            /// Property: dangerous_keys predicts strip exactly
            #[test]
            fn proptest_detection_matches_strip(params in arb_param_map()) {
                let sanitizer = KeySanitizer::default();
                let predicted = sanitizer.dangerous_keys(&params);

                let mut copy = params.clone();
                let removed = sanitizer.strip(&mut copy);

                prop_assert_eq!(predicted, removed);
            }
        }
    }
}
