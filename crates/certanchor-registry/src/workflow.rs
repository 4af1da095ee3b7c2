//! Issuance and verification drivers.
//!
//! These are the two sequential pipelines of the system: encode → hash →
//! anchor at issuance, and recompute → fetch → reconcile at verification.
//! Encoding failures surface before any network traffic, and neither driver
//! retries; failures propagate as typed errors for the caller to decide.

use crate::client::{Registry, TxReceipt};
use crate::error::IssueError;
use certanchor_canonical::{CertificateId, Fingerprint};
use certanchor_core::{
    compute_fingerprint, CanonicalPayload, CertificateRecord, EncodingError, LookupOutcome,
    VerificationVerdict,
};
use tracing::warn;

/// Result of a successful issuance: the derived identity plus the anchor
/// receipt.
#[derive(Debug, Clone)]
pub struct IssuedCertificate {
    /// Ledger lookup key derived from the record.
    pub id: CertificateId,
    /// Fingerprint anchored on the ledger.
    pub fingerprint: Fingerprint,
    /// Submission receipt from the registry.
    pub receipt: TxReceipt,
}

/// Issues a certificate: project, fingerprint, derive the id, anchor.
///
/// Projection errors return before anything touches the network, so
/// malformed data is never partially anchored. A failed anchor means the
/// certificate is **not issued** — there is no local fallback that would
/// fabricate success.
pub async fn issue_certificate<R: Registry + ?Sized>(
    registry: &R,
    record: &CertificateRecord,
    uri: &str,
) -> Result<IssuedCertificate, IssueError> {
    let payload = CanonicalPayload::project(record)?;
    let fingerprint = payload.fingerprint()?;
    let id = payload.certificate_id()?;

    let receipt = registry.anchor(&id, &fingerprint, uri).await?;

    Ok(IssuedCertificate {
        id,
        fingerprint,
        receipt,
    })
}

/// Verifies a certificate id against the registry.
///
/// With no local record the verdict is `NotFound` immediately — the
/// registry is not consulted. Otherwise the fingerprint is recomputed from
/// the local record (the recomputation, not any stored value, is the source
/// of truth), the registry is read once, and the pure reconciliation in
/// `certanchor-core` produces the verdict. A registry that is down or
/// unconfigured yields the observable `Unconfirmed` verdict rather than a
/// silent downgrade to local trust.
pub async fn verify_certificate<R: Registry + ?Sized>(
    registry: &R,
    id: CertificateId,
    local: Option<&CertificateRecord>,
) -> Result<VerificationVerdict, EncodingError> {
    let Some(record) = local else {
        return Ok(VerificationVerdict::NotFound { id });
    };

    let fingerprint = compute_fingerprint(record)?;

    let lookup = match registry.fetch(&id).await {
        Ok(Some(on_chain)) => LookupOutcome::Found(on_chain),
        Ok(None) => LookupOutcome::Absent,
        Err(err) => {
            warn!(%err, id = %id, "registry lookup failed; verdict degrades to unconfirmed");
            LookupOutcome::Unavailable
        }
    };

    Ok(VerificationVerdict::reconcile(id, fingerprint, lookup))
}
