//! Decoding of form-encoded query strings and cookie headers.
//!
//! Keys may carry bracketed sub-keys (`a[b][c]=1`), which expand into nested
//! [`ParamMap`]s. An empty bracket pair (`a[]=x`) appends under the next free
//! numeric index, and is dropped once `u64::MAX` is taken.

use percent_encoding::percent_decode_str;
use url::form_urlencoded;

use crate::params::{ParamMap, ParamValue};

/// Decodes an `application/x-www-form-urlencoded` string into a nested map.
///
/// Pairs with an empty key are dropped. A later duplicate key overwrites an
/// earlier one.
///
/// # Examples
///
/// ```
/// use request_guard::{parse_query, ParamValue};
///
/// let params = parse_query("a=1&b[c]=2&list[]=x&list[]=y");
///
/// assert_eq!(params.get("a"), Some(&ParamValue::from("1")));
/// let b = params.get("b").and_then(ParamValue::as_map).unwrap();
/// assert_eq!(b.get("c"), Some(&ParamValue::from("2")));
/// let list = params.get("list").and_then(ParamValue::as_map).unwrap();
/// assert_eq!(list.get("1"), Some(&ParamValue::from("y")));
/// ```
pub fn parse_query(raw: &str) -> ParamMap {
    let mut params = ParamMap::new();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        insert_pair(&mut params, &key, value.into_owned());
    }
    params
}

/// Decodes a `Cookie` request header (`name=value; other=value`).
///
/// Names and values are percent-decoded. `+` is kept literally, unlike in
/// form data. Entries without `=` are ignored.
pub fn parse_cookie_header(header: &str) -> ParamMap {
    let mut params = ParamMap::new();
    for pair in header.split(';') {
        let Some((name, value)) = pair.trim().split_once('=') else {
            continue;
        };
        let name = percent_decode_str(name.trim()).decode_utf8_lossy();
        let value = percent_decode_str(value.trim()).decode_utf8_lossy();
        insert_pair(&mut params, &name, value.into_owned());
    }
    params
}

/// Inserts one decoded `key=value` pair, expanding bracketed sub-keys.
pub(crate) fn insert_pair(params: &mut ParamMap, key: &str, value: String) {
    if key.is_empty() {
        return;
    }
    match split_key(key) {
        Some((base, path)) => assign(params, Some(base), &path, value),
        None => {
            params.insert(key.to_string(), ParamValue::Scalar(value));
        }
    }
}

/// Splits `base[x][y]` into `("base", [Some("x"), Some("y")])`.
///
/// `None` segments come from `[]`. Returns `None` when the key has no
/// well-formed bracket group, in which case it is used literally. Text after
/// the last complete group is ignored.
fn split_key(key: &str) -> Option<(&str, Vec<Option<String>>)> {
    let open = key.find('[')?;
    if open == 0 {
        return None;
    }
    let base = &key[..open];
    let mut rest = &key[open..];
    let mut path = Vec::new();

    while let Some(group) = rest.strip_prefix('[') {
        let Some(close) = group.find(']') else {
            break;
        };
        let segment = &group[..close];
        path.push(if segment.is_empty() {
            None
        } else {
            Some(segment.to_string())
        });
        rest = &group[close + 1..];
    }

    if path.is_empty() {
        return None;
    }
    Some((base, path))
}

fn assign(map: &mut ParamMap, key: Option<&str>, rest: &[Option<String>], value: String) {
    let key = match key {
        Some(k) => k.to_string(),
        None => match next_index(map) {
            Some(index) => index.to_string(),
            None => return,
        },
    };

    let Some((next, tail)) = rest.split_first() else {
        map.insert(key, ParamValue::Scalar(value));
        return;
    };

    let entry = map
        .entry(key)
        .or_insert_with(|| ParamValue::Nested(ParamMap::new()));
    if entry.is_scalar() {
        *entry = ParamValue::Nested(ParamMap::new());
    }
    if let ParamValue::Nested(child) = entry {
        assign(child, next.as_deref(), tail, value);
    }
}

/// Next free numeric index, or `None` once `u64::MAX` is taken.
fn next_index(map: &ParamMap) -> Option<u64> {
    match map.keys().filter_map(|k| k.parse::<u64>().ok()).max() {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}
