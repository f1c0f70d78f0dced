#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz snapshot decoding.
///
/// Any accepted snapshot must have unique ids and survive a full
/// self-comparison.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(snapshot) = ui_parity::pipeline::parse_snapshot_str(s) {
            assert!(snapshot.duplicate_ids().is_empty());
            let _ = ui_parity::ReportAggregator::default().compare(&snapshot, &snapshot);
        }
    }
});
