//! SBF Comprehensive Test Suite
//!
//! End-to-end tests through the public `sbf` facade: records to bytes and
//! back, the envelope contract, and the file helpers.
//!
//! ## Test Organization
//!
//! - `fixtures.rs` - Shared record fixtures
//! - `record_tests.rs` - Record round-trips, plain and compressed
//! - `schema_evolution_tests.rs` - Former names, exclusion, visibility
//! - `envelope_tests.rs` - Header validation, byte layout, raw values
//! - `file_tests.rs` - `.sbf` save/load helpers
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test sbf_comprehensive
//! cargo test --test sbf_comprehensive envelope
//! ```

mod envelope_tests;
mod file_tests;
mod fixtures;
mod record_tests;
mod schema_evolution_tests;
