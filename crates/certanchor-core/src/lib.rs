//! Certificate data model, fingerprinting, and reconciliation for CertAnchor.
//!
//! This crate provides:
//! - The authoritative off-chain `CertificateRecord`
//! - The PII-minimizing `CanonicalPayload` projection used as hash input
//! - Content fingerprint and certificate-id derivation
//! - The pure reconciliation step that turns local and on-chain data into a
//!   `VerificationVerdict`
//!
//! Core invariants:
//! - Fingerprints and ids are content-derived: `H(domain || canonical_bytes)`
//! - Projection and derivation are deterministic and offline
//! - The reconciler holds no state and performs no I/O; ledger access lives
//!   in `certanchor-registry`
//!
#![deny(missing_docs)]

/// Certificate-id derivation and fingerprint recomputation.
pub mod cert_id;
/// Error types for core operations.
pub mod errors;
/// Canonical payload projection and fingerprinting.
pub mod payload;
/// Reconciliation of local records against on-chain records.
pub mod reconcile;
/// Certificate record types.
pub mod record;

pub use cert_id::{compute_fingerprint, derive_certificate_id};
pub use errors::EncodingError;
pub use payload::CanonicalPayload;
pub use reconcile::{LookupOutcome, OnChainRecord, RejectionReason, VerificationVerdict};
pub use record::{CertificateRecord, CertificateType, VerificationStatus};
