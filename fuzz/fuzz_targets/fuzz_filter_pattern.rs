#![no_main]

use libfuzzer_sys::fuzz_target;
use node_selector::TextFilter;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let (pattern, candidate) = content.split_once('\n').unwrap_or((content, ""));
        // Typed patterns fall back to literal text instead of failing
        let _ = TextFilter::lenient(pattern).is_match(candidate);
        let _ = TextFilter::new(pattern);
    }
});
