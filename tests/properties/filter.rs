//! Property tests for the text filter and visibility.

use proptest::prelude::*;

use node_selector::{build, matches, FilterTarget, TextFilter, Visibility};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Matching ignores letter case.
    #[test]
    fn property_matches_is_case_insensitive(
        needle in "[a-zA-Z]{1,4}",
        haystack in "[a-zA-Z]{0,12}",
    ) {
        prop_assert_eq!(
            matches(&needle, &haystack),
            matches(&needle.to_uppercase(), &haystack.to_lowercase())
        );
    }

    /// PROPERTY: A literal substring always matches.
    #[test]
    fn property_substring_matches(
        prefix in "[a-z]{0,6}",
        needle in "[a-z]{1,6}",
        suffix in "[a-z]{0,6}",
    ) {
        let candidate = format!("{}{}{}", prefix, needle, suffix);
        prop_assert!(matches(&needle, &candidate));
    }

    /// PROPERTY: Lenient filters accept any pattern without panicking.
    #[test]
    fn property_lenient_never_panics(pattern in "(?s).{0,16}", candidate in ".{0,16}") {
        let _ = TextFilter::lenient(&pattern).is_match(&candidate);
    }

    /// PROPERTY: A visible node always has visible ancestors.
    #[test]
    fn property_visible_nodes_have_visible_ancestors(
        names in proptest::collection::vec("/[a-c]{1,2}/[a-c]{1,2}/[a-c]{1,2}", 0..=16),
        pattern in "[a-c]{1,2}",
        by_path in any::<bool>(),
    ) {
        let forest = build(&names).unwrap();
        let target = if by_path { FilterTarget::Path } else { FilterTarget::Label };
        let visibility = Visibility::compute(&forest, &TextFilter::lenient(&pattern), target);

        for (r, root) in forest.roots().iter().enumerate() {
            for (c, child) in root.children.iter().enumerate() {
                for (g, _) in child.children.iter().enumerate() {
                    if visibility.is_visible(&[r, c, g]) {
                        prop_assert!(visibility.is_visible(&[r, c]));
                        prop_assert!(visibility.is_visible(&[r]));
                    }
                }
            }
        }
    }
}
