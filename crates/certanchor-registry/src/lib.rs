//! Async registry client for anchoring and reading certificate fingerprints.
//!
//! The ledger is modeled as an opaque key/value registry behind the
//! [`Registry`] trait: `anchor` writes an id/fingerprint pair (irreversible,
//! requires a signing-capable endpoint), `fetch` reads one back (side-effect
//! free, no authority needed). Two implementations ship here:
//!
//! - [`HttpRegistry`] — JSON-RPC against an EVM-compatible chain; the RPC
//!   endpoint holds the keys, this crate never does
//! - [`InMemoryRegistry`] — local map for tests and registry-less operation
//!
//! Transport failure is always surfaced as [`RegistryError::Unavailable`],
//! never as "not found"; missing configuration degrades to
//! [`RegistryError::NotConfigured`] instead of crashing.
//!
#![deny(missing_docs)]

/// The registry trait and transaction receipts.
pub mod client;
/// Endpoint and chain configuration.
pub mod config;
/// Registry error taxonomy.
pub mod error;
/// JSON-RPC EVM registry implementation.
pub mod evm;
/// In-memory registry implementation.
pub mod memory;
/// Issuance and verification drivers.
pub mod workflow;

pub use client::{Registry, TxReceipt, UnconfiguredRegistry};
pub use config::{ChainProfile, RegistryConfig};
pub use error::{AnchorError, IssueError, RegistryError};
pub use evm::HttpRegistry;
pub use memory::InMemoryRegistry;
pub use workflow::{issue_certificate, verify_certificate, IssuedCertificate};
