//! Reconciliation of local records against on-chain records.
//!
//! [`VerificationVerdict::reconcile`] is pure and idempotent: repeated calls
//! with unchanged inputs produce identical verdicts. Fetching the on-chain
//! record (and deciding whether to fetch at all) is the caller's job; see
//! `certanchor-registry`.

use certanchor_canonical::{CertificateId, Fingerprint, LedgerAddress};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The registry's stored tuple for a certificate id.
///
/// Created by an anchor write at issuance, mutated only by revocation,
/// never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnChainRecord {
    /// Fingerprint anchored at issuance.
    #[serde(rename = "contentHash")]
    pub content_fingerprint: Fingerprint,
    /// Address that submitted the anchor transaction.
    pub issuer: LedgerAddress,
    /// Issuance timestamp, unix seconds.
    pub issued_at: u64,
    /// Set by the revoke operation; once set, the certificate is rejected
    /// regardless of fingerprint match.
    pub revoked: bool,
    /// Off-chain storage locator for the full certificate document.
    pub uri: String,
}

/// Outcome of asking the registry for an id.
///
/// `Unavailable` is distinct from `Absent` on purpose: "the ledger is down"
/// must never be conflated with "the certificate does not exist".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The id is anchored.
    Found(OnChainRecord),
    /// The id was never anchored.
    Absent,
    /// The registry could not be reached or is not configured.
    Unavailable,
}

/// Why a certificate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The anchored fingerprint differs from the recomputed one.
    FingerprintMismatch,
    /// The on-chain record carries the revoked flag.
    Revoked,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::FingerprintMismatch => f.write_str("fingerprint mismatch"),
            RejectionReason::Revoked => f.write_str("revoked on chain"),
        }
    }
}

/// Outcome of reconciling a local record with the registry.
///
/// Tagged so each variant carries exactly the fields valid for that case.
/// Ephemeral: recomputed on every verification request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum VerificationVerdict {
    /// Anchored, fingerprints match, not revoked.
    Verified {
        /// Requested certificate id.
        id: CertificateId,
        /// Locally recomputed fingerprint.
        fingerprint: Fingerprint,
        /// The anchored record.
        on_chain: OnChainRecord,
    },
    /// Anchored but revoked, or fingerprints differ.
    Rejected {
        /// Requested certificate id.
        id: CertificateId,
        /// Locally recomputed fingerprint.
        fingerprint: Fingerprint,
        /// The anchored record.
        on_chain: OnChainRecord,
        /// Which rule rejected it.
        reason: RejectionReason,
    },
    /// No local record, or the id was never anchored.
    NotFound {
        /// Requested certificate id.
        id: CertificateId,
    },
    /// The registry was unavailable or unconfigured: confirmation could not
    /// be obtained. Explicitly not the same as `Verified` — callers must
    /// present this as "could not confirm", never as local-only trust.
    Unconfirmed {
        /// Requested certificate id.
        id: CertificateId,
        /// Locally recomputed fingerprint, for later comparison.
        fingerprint: Fingerprint,
    },
}

impl VerificationVerdict {
    /// Combines a recomputed fingerprint with a registry lookup outcome.
    ///
    /// Revocation takes precedence: a revoked record is rejected even when
    /// the fingerprints match. Fingerprint comparison is over raw digest
    /// bytes, so hex casing on the wire cannot affect it.
    pub fn reconcile(
        id: CertificateId,
        fingerprint: Fingerprint,
        lookup: LookupOutcome,
    ) -> Self {
        match lookup {
            LookupOutcome::Unavailable => VerificationVerdict::Unconfirmed { id, fingerprint },
            LookupOutcome::Absent => VerificationVerdict::NotFound { id },
            LookupOutcome::Found(on_chain) => {
                if on_chain.revoked {
                    VerificationVerdict::Rejected {
                        id,
                        fingerprint,
                        on_chain,
                        reason: RejectionReason::Revoked,
                    }
                } else if on_chain.content_fingerprint != fingerprint {
                    VerificationVerdict::Rejected {
                        id,
                        fingerprint,
                        on_chain,
                        reason: RejectionReason::FingerprintMismatch,
                    }
                } else {
                    VerificationVerdict::Verified {
                        id,
                        fingerprint,
                        on_chain,
                    }
                }
            }
        }
    }

    /// The certificate id this verdict is about.
    pub fn id(&self) -> &CertificateId {
        match self {
            VerificationVerdict::Verified { id, .. }
            | VerificationVerdict::Rejected { id, .. }
            | VerificationVerdict::NotFound { id }
            | VerificationVerdict::Unconfirmed { id, .. } => id,
        }
    }

    /// True only for a confirmed, unrevoked, matching certificate.
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationVerdict::Verified { .. })
    }

    /// Stable status label for display and logs.
    pub fn status_label(&self) -> &'static str {
        match self {
            VerificationVerdict::Verified { .. } => "verified",
            VerificationVerdict::Rejected { .. } => "rejected",
            VerificationVerdict::NotFound { .. } => "not_found",
            VerificationVerdict::Unconfirmed { .. } => "unconfirmed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> CertificateId {
        CertificateId::digest(b"cert")
    }

    fn issuer() -> LedgerAddress {
        LedgerAddress::parse("0x0000000000000000000000000000000000000001").unwrap()
    }

    fn anchored(fingerprint: Fingerprint, revoked: bool) -> OnChainRecord {
        OnChainRecord {
            content_fingerprint: fingerprint,
            issuer: issuer(),
            issued_at: 1_704_067_200,
            revoked,
            uri: "ipfs://QmExample".into(),
        }
    }

    #[test]
    fn matching_unrevoked_record_verifies() {
        let fp = Fingerprint::digest(b"payload");
        let verdict =
            VerificationVerdict::reconcile(id(), fp, LookupOutcome::Found(anchored(fp, false)));
        assert!(verdict.is_verified());
        assert_eq!(verdict.status_label(), "verified");
    }

    #[test]
    fn mismatched_fingerprint_rejects() {
        let local = Fingerprint::digest(b"payload");
        let tampered = Fingerprint::digest(b"tampered payload");
        let verdict = VerificationVerdict::reconcile(
            id(),
            local,
            LookupOutcome::Found(anchored(tampered, false)),
        );
        assert!(matches!(
            verdict,
            VerificationVerdict::Rejected {
                reason: RejectionReason::FingerprintMismatch,
                ..
            }
        ));
    }

    #[test]
    fn revocation_wins_over_a_matching_fingerprint() {
        let fp = Fingerprint::digest(b"payload");
        let verdict =
            VerificationVerdict::reconcile(id(), fp, LookupOutcome::Found(anchored(fp, true)));
        assert!(matches!(
            verdict,
            VerificationVerdict::Rejected {
                reason: RejectionReason::Revoked,
                ..
            }
        ));
    }

    #[test]
    fn absent_record_is_not_found() {
        let fp = Fingerprint::digest(b"payload");
        let verdict = VerificationVerdict::reconcile(id(), fp, LookupOutcome::Absent);
        assert_eq!(verdict.status_label(), "not_found");
    }

    #[test]
    fn unavailable_registry_is_unconfirmed_not_verified() {
        let fp = Fingerprint::digest(b"payload");
        let verdict = VerificationVerdict::reconcile(id(), fp, LookupOutcome::Unavailable);
        assert!(!verdict.is_verified());
        assert!(matches!(
            verdict,
            VerificationVerdict::Unconfirmed { fingerprint, .. } if fingerprint == fp
        ));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let fp = Fingerprint::digest(b"payload");
        let a = VerificationVerdict::reconcile(id(), fp, LookupOutcome::Found(anchored(fp, false)));
        let b = VerificationVerdict::reconcile(id(), fp, LookupOutcome::Found(anchored(fp, false)));
        assert_eq!(a, b);
    }

    #[test]
    fn verdict_serializes_with_status_tag() {
        let fp = Fingerprint::digest(b"payload");
        let verdict = VerificationVerdict::reconcile(id(), fp, LookupOutcome::Unavailable);
        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value["status"], "unconfirmed");
        assert!(value["fingerprint"].as_str().unwrap().starts_with("0x"));
    }
}
