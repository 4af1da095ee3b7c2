use crate::error::{AnchorError, RegistryError};
use async_trait::async_trait;
use certanchor_canonical::{CertificateId, Fingerprint};
use certanchor_core::OnChainRecord;
use serde::Serialize;

/// Receipt for a submitted anchor transaction.
///
/// A receipt proves submission, not finality; an abandoned write may still
/// take effect on the ledger, so cancellation means "outcome unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    /// Ledger transaction hash or local submission id.
    pub transaction_hash: String,
    /// Chain the transaction was submitted to.
    pub chain: String,
}

/// The external ledger, reduced to the two operations the core needs.
///
/// Implementations are stateless facades over their transport: no mutable
/// shared state, so concurrent calls need no locking discipline from
/// callers.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Anchors a fingerprint under an id. External, irreversible, visible
    /// to all readers after confirmation. Requires write authority at the
    /// endpoint.
    async fn anchor(
        &self,
        id: &CertificateId,
        fingerprint: &Fingerprint,
        uri: &str,
    ) -> Result<TxReceipt, AnchorError>;

    /// Fetches the anchored record for an id, or `None` if the id was never
    /// anchored. Side-effect free; safe to call without authority.
    async fn fetch(&self, id: &CertificateId) -> Result<Option<OnChainRecord>, RegistryError>;
}

/// The explicit "no registry configured" mode.
///
/// Every operation fails with [`RegistryError::NotConfigured`], which the
/// verification driver turns into an `Unconfirmed` verdict. Hosting
/// applications use this instead of silently downgrading to local trust.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredRegistry;

#[async_trait]
impl Registry for UnconfiguredRegistry {
    async fn anchor(
        &self,
        _id: &CertificateId,
        _fingerprint: &Fingerprint,
        _uri: &str,
    ) -> Result<TxReceipt, AnchorError> {
        Err(AnchorError::Registry(RegistryError::NotConfigured))
    }

    async fn fetch(&self, _id: &CertificateId) -> Result<Option<OnChainRecord>, RegistryError> {
        Err(RegistryError::NotConfigured)
    }
}
