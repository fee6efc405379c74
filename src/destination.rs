//! Validation of the `destination` redirect parameter.
//!
//! A destination whose own query string carries reserved keys is rejected as
//! a whole rather than cleaned, the same way an untrusted external redirect
//! target is dropped instead of rewritten.

use crate::query::parse_query;
use crate::sanitizer::{KeySanitizer, RemovedKeys};
use crate::url_parser::ParsedUrl;

/// Query key carrying the redirect target.
pub const DESTINATION_KEY: &str = "destination";

/// Returns the dangerous keys carried by a destination value.
///
/// The destination is parsed with [`ParsedUrl::parse`] and its query checked.
/// When the text after the first `?` also contains a `#`, that whole tail is
/// decoded as a query and checked as well: a fragment delimiter can be lost
/// or re-encoded when the redirect is rebuilt, so `node?#danger=1` counts as
/// carrying `#danger`.
///
/// # Examples
///
/// ```
/// use request_guard::{find_dangerous_keys, KeySanitizer};
///
/// let sanitizer = KeySanitizer::default();
///
/// assert!(find_dangerous_keys(&sanitizer, "node?safe=1").is_empty());
/// assert!(find_dangerous_keys(&sanitizer, "node?a[%23markup]=x").contains("#markup"));
/// assert!(find_dangerous_keys(&sanitizer, "node?#danger=1").contains("#danger"));
/// ```
pub fn find_dangerous_keys(sanitizer: &KeySanitizer, destination: &str) -> RemovedKeys {
    let parsed = ParsedUrl::parse(destination);
    let mut found = if parsed.query.is_empty() {
        RemovedKeys::new()
    } else {
        sanitizer.dangerous_keys(&parsed.query)
    };

    if let Some((_, tail)) = destination.split_once('?') {
        if tail.contains('#') {
            for key in sanitizer.dangerous_keys(&parse_query(tail)).as_slice() {
                if !found.contains(key) {
                    found.push(key.as_str());
                }
            }
        }
    }

    found
}
