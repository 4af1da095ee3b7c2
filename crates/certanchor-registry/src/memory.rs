//! In-memory registry for tests and registry-less local operation.

use crate::client::{Registry, TxReceipt};
use crate::error::{AnchorError, RegistryError};
use async_trait::async_trait;
use certanchor_canonical::{CertificateId, Fingerprint, LedgerAddress};
use certanchor_core::OnChainRecord;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Map-backed registry with the same contract as the on-chain one:
/// anchoring an already-anchored id is rejected, records are never deleted,
/// revocation only flips the flag.
#[derive(Debug)]
pub struct InMemoryRegistry {
    issuer: LedgerAddress,
    records: Mutex<BTreeMap<CertificateId, OnChainRecord>>,
    reads: AtomicU64,
}

impl InMemoryRegistry {
    /// Creates an empty registry that stamps `issuer` on every anchor.
    pub fn new(issuer: LedgerAddress) -> Self {
        Self {
            issuer,
            records: Mutex::new(BTreeMap::new()),
            reads: AtomicU64::new(0),
        }
    }

    /// Number of `fetch` calls served so far.
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Sets the revoked flag on an anchored record. Returns `false` if the
    /// id was never anchored.
    pub fn revoke(&self, id: &CertificateId) -> bool {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        match records.get_mut(id) {
            Some(record) => {
                record.revoked = true;
                true
            }
            None => false,
        }
    }

    fn now_unix() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

#[async_trait]
impl Registry for InMemoryRegistry {
    async fn anchor(
        &self,
        id: &CertificateId,
        fingerprint: &Fingerprint,
        uri: &str,
    ) -> Result<TxReceipt, AnchorError> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        if records.contains_key(id) {
            return Err(AnchorError::Rejected {
                reason: format!("id already anchored: {id}"),
            });
        }
        records.insert(
            *id,
            OnChainRecord {
                content_fingerprint: *fingerprint,
                issuer: self.issuer.clone(),
                issued_at: Self::now_unix(),
                revoked: false,
                uri: uri.to_string(),
            },
        );
        Ok(TxReceipt {
            transaction_hash: format!("mem:{id}"),
            chain: "memory".into(),
        })
    }

    async fn fetch(&self, id: &CertificateId) -> Result<Option<OnChainRecord>, RegistryError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records.get(id).cloned())
    }
}
