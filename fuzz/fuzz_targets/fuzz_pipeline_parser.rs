#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 { return; }
    if let Ok(s) = std::str::from_utf8(data) {
        // Must reject bad input with an error, never panic
        let _ = recquery::query::parse_pipeline_json(s);
    }
});
