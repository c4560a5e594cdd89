//! Conformance harness: wire-level invariants of the concealment format.
//!
//! Invariant coverage:
//! - Envelope layout: fixed offsets, big-endian length, truncation rules
//! - Symmetric layer: HKDF-SHA256 + AES-256-GCM against golden vectors
//! - Stego capacity and bit order against golden vectors
//! - Tamper detection: any modified byte fails authentication
//! - Error code registry: exact list, uniqueness, variant mapping
//!
//! Golden vectors live in `tests/vectors/` and are consumed read-only.

mod common;

mod envelope_layout;
mod error_code_registry;
mod tamper_detection;
