#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(rule) = nextdate::Rule::parse(s) {
            let displayed = rule.to_string();
            let reparsed =
                nextdate::Rule::parse(&displayed).expect("display output must be parseable");
            assert_eq!(rule, reparsed, "roundtrip changed the rule");
            assert_eq!(displayed, reparsed.to_string(), "roundtrip idempotency failed");
        }
    }
});
