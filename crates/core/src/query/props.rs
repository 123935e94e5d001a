//! Property-based tests for list query parsing.

use proptest::prelude::*;

use super::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any `limit` input lands in `[1, 500]`.
    #[test]
    fn prop_limit_always_in_range(raw in ".*") {
        let limit = clamp_limit(Some(&raw));
        prop_assert!((MIN_LIMIT..=MAX_LIMIT).contains(&limit));
    }

    /// Any `offset` input lands in `[0, 1_000_000]`.
    #[test]
    fn prop_offset_always_in_range(raw in ".*") {
        let offset = clamp_offset(Some(&raw));
        prop_assert!(offset <= MAX_OFFSET);
    }

    /// Integral inputs inside the range are preserved.
    #[test]
    fn prop_limit_in_range_is_identity(n in 1u64..=500) {
        prop_assert_eq!(clamp_limit(Some(&n.to_string())), n);
    }

    /// Parsing arbitrary pairs never panics and every non-reserved key
    /// ends up either as a filter or in the ignored list.
    #[test]
    fn prop_every_key_is_accounted_for(
        pairs in prop::collection::vec(("[a-z_]{1,8}", ".{0,12}"), 0..8)
    ) {
        let query = ListQuery::parse(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        let candidates = pairs
            .iter()
            .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str()))
            .count();
        prop_assert_eq!(query.filters.len() + query.ignored.len(), candidates);
    }
}
