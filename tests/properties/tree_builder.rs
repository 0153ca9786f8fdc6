//! Property tests for building trees from node names.

use std::collections::BTreeSet;

use proptest::prelude::*;

use node_selector::{build, MergePolicy, NodeSelectorPanel, PanelOptions, StaticSource, TreeBuilder};

fn segment() -> impl Strategy<Value = String> {
    // Few distinct labels so that names share prefixes often.
    proptest::string::string_regex("[a-c]{1,2}").unwrap()
}

/// Rooted names of a fixed depth, so no name is a prefix of another.
fn names_of_depth(depth: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(
        proptest::collection::vec(segment(), depth).prop_map(|segs| format!("/{}", segs.join("/"))),
        0..=24,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Contiguously grouped input yields exactly the input names as leaves.
    #[test]
    fn property_sorted_input_round_trips_leaves(mut names in names_of_depth(3)) {
        names.sort();
        let forest = build(&names).unwrap();

        let leaves: BTreeSet<String> = forest.leaf_names().into_iter().collect();
        let input: BTreeSet<String> = names.iter().cloned().collect();
        prop_assert_eq!(leaves, input);
    }

    /// PROPERTY: With sorted input, adjacent merge never repeats a root label.
    #[test]
    fn property_sorted_input_has_unique_roots(mut names in names_of_depth(2)) {
        names.sort();
        let forest = build(&names).unwrap();

        let labels: Vec<&str> = forest.roots().iter().map(|r| r.label.as_str()).collect();
        let unique: BTreeSet<&str> = labels.iter().copied().collect();
        prop_assert_eq!(labels.len(), unique.len());
    }

    /// PROPERTY: Global merge gives unique root labels for any input order.
    #[test]
    fn property_global_merge_unique_roots(names in names_of_depth(2)) {
        let forest = TreeBuilder::new()
            .merge(MergePolicy::Global)
            .build(&names)
            .unwrap();

        let labels: Vec<&str> = forest.roots().iter().map(|r| r.label.as_str()).collect();
        let unique: BTreeSet<&str> = labels.iter().copied().collect();
        prop_assert_eq!(labels.len(), unique.len());

        let leaves: BTreeSet<String> = forest.leaf_names().into_iter().collect();
        let input: BTreeSet<String> = names.iter().cloned().collect();
        prop_assert_eq!(leaves, input);
    }

    /// PROPERTY: Every leaf sits at the depth of its name.
    #[test]
    fn property_forest_depth_matches_names(names in names_of_depth(3)) {
        let forest = build(&names).unwrap();
        let expected = if names.is_empty() { 0 } else { 3 };
        prop_assert_eq!(forest.depth(), expected);
    }

    /// PROPERTY: Building never panics on arbitrary input.
    #[test]
    fn property_build_never_panics(
        names in proptest::collection::vec("(?s).{0,32}", 0..=8)
    ) {
        let _ = build(&names);
    }

    /// PROPERTY: Rebuilding from an unchanged source gives an identical forest.
    #[test]
    fn property_refresh_is_idempotent(names in names_of_depth(2)) {
        let mut panel =
            NodeSelectorPanel::new(StaticSource::new(names.clone()), PanelOptions::default())
                .unwrap();
        let first = panel.forest().clone();

        let report = panel.refresh().unwrap();

        prop_assert!(!report.changed);
        prop_assert!(first.same_structure(panel.forest()));
    }
}
