#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parse should never panic, only return Ok or Err
        if let Ok(rule) = nextdate::Rule::parse(s) {
            // and neither should evaluating what it accepted
            let now = jiff::civil::date(2024, 1, 31);
            let _ = rule.next_after(now, now);
            let _ = rule.next_after_with(now, now, nextdate::SentinelPolicy::Anchored);
        }
    }
});
