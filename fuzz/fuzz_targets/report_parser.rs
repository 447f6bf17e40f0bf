#![no_main]

use benchsig::comparison::{compare, ComparisonConfig};
use benchsig::report_loader::parse_result_set;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing arbitrary input must never panic
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(result_set) = parse_result_set("fuzz", input) {
            // Comparing a report with itself must not panic either
            let report = compare(&result_set, &result_set, &ComparisonConfig::default());
            let _ = report.to_report_string();
        }
    }
});
