use certanchor_core::EncodingError;
use thiserror::Error;

/// Transport-level registry errors.
///
/// `Unavailable` and `NotConfigured` are degraded-but-valid states: callers
/// map them to an unconfirmed verdict, never to "certificate does not
/// exist". Absence of a record is not an error at all; reads return
/// `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No endpoint or contract address is configured. Local-only operation
    /// remains possible.
    #[error("registry is not configured")]
    NotConfigured,
    /// The ledger endpoint could not be reached.
    #[error("registry unavailable: {reason}")]
    Unavailable {
        /// Transport failure detail.
        reason: String,
    },
    /// The endpoint answered, but not with anything this client understands.
    #[error("registry protocol error: {reason}")]
    Protocol {
        /// Decode or envelope failure detail.
        reason: String,
    },
    /// Configuration was present but malformed.
    #[error("invalid registry configuration: {reason}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        reason: String,
    },
}

/// Errors from the anchor (write) operation.
///
/// A failed anchor means the certificate was not issued; callers must not
/// fabricate success.
#[derive(Debug, Error)]
pub enum AnchorError {
    /// Transport or configuration failure before the write could land.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The signing capability refused the transaction.
    #[error("signing rejected: {reason}")]
    SigningRejected {
        /// Refusal detail.
        reason: String,
    },
    /// The ledger rejected the write (duplicate id, contract revert).
    #[error("anchor rejected: {reason}")]
    Rejected {
        /// Rejection detail.
        reason: String,
    },
}

/// Errors from the issuance workflow.
#[derive(Debug, Error)]
pub enum IssueError {
    /// The record failed projection; nothing was sent to the ledger.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// The anchor write failed; the certificate is not issued.
    #[error(transparent)]
    Anchor(#[from] AnchorError),
}
