//! Canonical encoding and digest primitives for CertAnchor.
//!
//! Everything that participates in fingerprinting or ledger lookup lives in
//! this crate: the canonical byte encoding, the domain-separated SHA-256
//! digests, the fixed-width identifier newtypes, and the privacy-preserving
//! email digest. All functions here are pure; no I/O, no shared state.
//!
#![deny(missing_docs)]

/// Canonicalization helpers for deterministic hashing.
pub mod canonicalizer;
/// Digest primitives: content fingerprints and certificate ids.
pub mod digest;
/// Email normalization and one-way digesting.
pub mod email;
/// Validated identifier newtypes.
pub mod identifiers;
/// Validation helpers used by canonical types.
pub mod validation;

pub use canonicalizer::{canonicalize, CanonicalizationError};
pub use digest::{CertificateId, EmailDigest, Fingerprint};
pub use email::normalize_email;
pub use identifiers::{InstitutionId, LedgerAddress};
pub use validation::ValidationError;
