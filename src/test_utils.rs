//! Shared proptest strategies for unit tests.

use proptest::prelude::*;

use crate::params::{ParamMap, ParamValue};
use crate::whitelist::Whitelist;

/// Keys drawn from a small alphabet so reserved, empty and whitelisted keys
/// all show up often.
pub(crate) fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("#keep".to_string()),
        prop::string::string_regex("#[a-z_]{0,6}").unwrap(),
        prop::string::string_regex("[a-z][a-z0-9#_]{0,6}").unwrap(),
    ]
}

/// Arbitrary nested parameter maps, up to four levels deep.
pub(crate) fn arb_param_map() -> impl Strategy<Value = ParamMap> {
    let leaf = prop::string::string_regex("[ -~]{0,8}")
        .unwrap()
        .prop_map(ParamValue::Scalar);
    let value = leaf.prop_recursive(4, 32, 6, |inner| {
        prop::collection::btree_map(arb_key(), inner, 0..6).prop_map(ParamValue::Nested)
    });
    prop::collection::btree_map(arb_key(), value, 0..8)
}

/// Returns `true` if any key at any depth is reserved and not whitelisted.
pub(crate) fn has_dangerous_key(params: &ParamMap, whitelist: &Whitelist) -> bool {
    params.iter().any(|(key, value)| {
        (crate::is_reserved_key(key) && !whitelist.contains(key))
            || value
                .as_map()
                .is_some_and(|child| has_dangerous_key(child, whitelist))
    })
}
