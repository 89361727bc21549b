#![no_main]

use evidence_corpus::providers::OpenAlexWork;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as an OpenAlex work: Ok or Err, never a panic
    let _ = serde_json::from_slice::<OpenAlexWork>(data);
});
