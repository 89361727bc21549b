//! Fuzzing library for evidence-corpus.
//!
//! This crate provides fuzzing targets for the two untrusted parse
//! surfaces: the arXiv Atom feed and the OpenAlex JSON work shape.
//!
//! # Usage
//!
//! ```bash
//! cd crates/corpus-fuzz
//! cargo +nightly fuzz run fuzz_atom_parse -- -max_total_time=60
//! ```

pub use evidence_corpus::providers;
