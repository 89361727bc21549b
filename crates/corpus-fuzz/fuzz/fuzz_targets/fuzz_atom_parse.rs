#![no_main]

use evidence_corpus::providers::ArxivAdapter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as an Atom feed: may error, must never panic
    if let Ok(xml) = std::str::from_utf8(data) {
        let _ = ArxivAdapter::parse_feed(xml);
    }
});
