#![no_main]

use libfuzzer_sys::fuzz_target;
use node_selector::{MergePolicy, TreeBuilder};

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    // First character picks the separator, the rest is one name per line
    let mut chars = content.chars();
    let separator = chars.next().unwrap_or('/');
    let rest: String = chars.collect();
    let names: Vec<&str> = rest.lines().collect();

    for merge in [MergePolicy::Adjacent, MergePolicy::Global] {
        let builder = TreeBuilder::new().separator(separator).merge(merge);
        if let Ok(forest) = builder.build(&names) {
            assert!(forest.leaf_count() <= names.len());
        }
    }
});
