use async_trait::async_trait;
use certanchor_canonical::{CertificateId, Fingerprint, LedgerAddress};
use certanchor_core::{
    CertificateRecord, CertificateType, OnChainRecord, RejectionReason, VerificationStatus,
    VerificationVerdict,
};
use certanchor_registry::{
    issue_certificate, verify_certificate, AnchorError, InMemoryRegistry, IssueError, Registry,
    RegistryError, TxReceipt, UnconfiguredRegistry,
};

fn issuer() -> LedgerAddress {
    LedgerAddress::parse("0x00000000000000000000000000000000000000aa").unwrap()
}

fn bob_record() -> CertificateRecord {
    CertificateRecord {
        student_name: "Bob Jones".into(),
        student_email: "Bob@Example.com".into(),
        institution_name: "Example University".into(),
        institution_id: "inst-1".into(),
        course_name: "CS101".into(),
        grade: "A".into(),
        issue_date: "2024-01-01".into(),
        completion_date: "2023-12-15".into(),
        certificate_type: CertificateType::Certificate,
        verification_status: VerificationStatus::Pending,
    }
}

/// Registry stand-in whose transport is permanently down.
struct DownRegistry;

#[async_trait]
impl Registry for DownRegistry {
    async fn anchor(
        &self,
        _id: &CertificateId,
        _fingerprint: &Fingerprint,
        _uri: &str,
    ) -> Result<TxReceipt, AnchorError> {
        Err(AnchorError::Registry(RegistryError::Unavailable {
            reason: "connection refused".into(),
        }))
    }

    async fn fetch(&self, _id: &CertificateId) -> Result<Option<OnChainRecord>, RegistryError> {
        Err(RegistryError::Unavailable {
            reason: "connection refused".into(),
        })
    }
}

#[tokio::test]
async fn issue_then_verify_yields_verified() {
    let registry = InMemoryRegistry::new(issuer());
    let record = bob_record();

    let issued = issue_certificate(&registry, &record, "ipfs://QmExample")
        .await
        .unwrap();

    let verdict = verify_certificate(&registry, issued.id, Some(&record))
        .await
        .unwrap();
    assert!(verdict.is_verified());
    match verdict {
        VerificationVerdict::Verified { fingerprint, on_chain, .. } => {
            assert_eq!(fingerprint, issued.fingerprint);
            assert_eq!(on_chain.content_fingerprint, issued.fingerprint);
            assert_eq!(on_chain.uri, "ipfs://QmExample");
        }
        other => panic!("expected verified, got {}", other.status_label()),
    }
}

#[tokio::test]
async fn tampering_with_the_grade_yields_rejected() {
    let registry = InMemoryRegistry::new(issuer());
    let record = bob_record();
    let issued = issue_certificate(&registry, &record, "ipfs://QmExample")
        .await
        .unwrap();

    let mut tampered = record.clone();
    tampered.grade = "B".into();

    let verdict = verify_certificate(&registry, issued.id, Some(&tampered))
        .await
        .unwrap();
    match verdict {
        VerificationVerdict::Rejected { fingerprint, reason, .. } => {
            assert_ne!(fingerprint, issued.fingerprint);
            assert_eq!(reason, RejectionReason::FingerprintMismatch);
        }
        other => panic!("expected rejected, got {}", other.status_label()),
    }
}

#[tokio::test]
async fn revocation_rejects_an_otherwise_valid_certificate() {
    let registry = InMemoryRegistry::new(issuer());
    let record = bob_record();
    let issued = issue_certificate(&registry, &record, "ipfs://QmExample")
        .await
        .unwrap();
    assert!(registry.revoke(&issued.id));

    let verdict = verify_certificate(&registry, issued.id, Some(&record))
        .await
        .unwrap();
    assert!(matches!(
        verdict,
        VerificationVerdict::Rejected {
            reason: RejectionReason::Revoked,
            ..
        }
    ));
}

#[tokio::test]
async fn missing_local_record_short_circuits_without_a_read() {
    let registry = InMemoryRegistry::new(issuer());
    let id = CertificateId::digest(b"whatever");

    let verdict = verify_certificate(&registry, id, None).await.unwrap();
    assert_eq!(verdict.status_label(), "not_found");
    assert_eq!(registry.read_count(), 0);
}

#[tokio::test]
async fn unanchored_id_with_local_record_is_not_found() {
    let registry = InMemoryRegistry::new(issuer());
    let record = bob_record();
    let id = CertificateId::digest(b"never anchored");

    let verdict = verify_certificate(&registry, id, Some(&record)).await.unwrap();
    assert_eq!(verdict.status_label(), "not_found");
    assert_eq!(registry.read_count(), 1);
}

#[tokio::test]
async fn registry_outage_is_unconfirmed_not_rejected() {
    let record = bob_record();
    let id = CertificateId::digest(b"some id");

    let verdict = verify_certificate(&DownRegistry, id, Some(&record))
        .await
        .unwrap();
    assert!(matches!(verdict, VerificationVerdict::Unconfirmed { .. }));
}

#[tokio::test]
async fn unconfigured_registry_yields_unconfirmed() {
    let record = bob_record();
    let id = certanchor_core::derive_certificate_id(&record).unwrap();

    let verdict = verify_certificate(&UnconfiguredRegistry, id, Some(&record))
        .await
        .unwrap();
    assert!(matches!(verdict, VerificationVerdict::Unconfirmed { .. }));

    let err = issue_certificate(&UnconfiguredRegistry, &record, "ipfs://QmX")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        IssueError::Anchor(AnchorError::Registry(RegistryError::NotConfigured))
    ));
}

#[tokio::test]
async fn malformed_record_fails_before_any_network_call() {
    let registry = InMemoryRegistry::new(issuer());
    let mut record = bob_record();
    record.issue_date = "not a date".into();

    let err = issue_certificate(&registry, &record, "ipfs://QmExample")
        .await
        .unwrap_err();
    assert!(matches!(err, IssueError::Encoding(_)));

    // Nothing was anchored and the registry was never consulted.
    assert_eq!(registry.read_count(), 0);
    let good = bob_record();
    let id = certanchor_core::derive_certificate_id(&good).unwrap();
    assert!(registry.fetch(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn reissuing_the_same_logical_certificate_is_rejected() {
    let registry = InMemoryRegistry::new(issuer());
    let record = bob_record();
    issue_certificate(&registry, &record, "ipfs://QmA").await.unwrap();

    // Same identity fields, different uri: same id, duplicate anchor.
    let err = issue_certificate(&registry, &record, "ipfs://QmB")
        .await
        .unwrap_err();
    assert!(matches!(err, IssueError::Anchor(AnchorError::Rejected { .. })));
}

#[tokio::test]
async fn verification_is_idempotent_across_repeated_requests() {
    let registry = InMemoryRegistry::new(issuer());
    let record = bob_record();
    let issued = issue_certificate(&registry, &record, "ipfs://QmExample")
        .await
        .unwrap();

    let a = verify_certificate(&registry, issued.id, Some(&record)).await.unwrap();
    let b = verify_certificate(&registry, issued.id, Some(&record)).await.unwrap();
    assert_eq!(a, b);
}
