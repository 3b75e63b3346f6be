#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 { return; }
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(ops) = recquery::query::parse_pipeline_json(s) {
            let docs = [
                bson::doc!{"a": 1, "b": 2, "name": "x"},
                bson::doc!{"a": 10.5, "b": -5, "name": "y", "nested": {"z": 3}},
                bson::doc!{"active": true, "a": f64::NAN},
                bson::doc!{"name": "x", "when": bson::DateTime::from_millis(0)},
            ];
            let out = recquery::query::query(&docs, ops);
            assert!(out.len() <= docs.len());
        }
    }
});
