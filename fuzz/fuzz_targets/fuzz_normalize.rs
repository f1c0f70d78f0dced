#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz value classification and normalization.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = ui_parity::normalize::classify(s);
        let _ = ui_parity::normalize::normalize(s);
        let _ = ui_parity::normalize::parse_number(s);
    }
});
