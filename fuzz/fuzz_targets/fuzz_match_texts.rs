#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz label pairing with newline-separated source and target lists.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (left, right) = s.split_once('\0').unwrap_or((s, ""));
        let source: Vec<&str> = left.lines().collect();
        let target: Vec<&str> = right.lines().collect();
        let result = ui_parity::match_texts(&source, &target, 0.5);
        assert_eq!(result.pairs.len() + result.unmatched_source.len(), source.len());
        assert_eq!(result.pairs.len() + result.unmatched_target.len(), target.len());
    }
});
