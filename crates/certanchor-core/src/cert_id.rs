//! Certificate-id derivation and fingerprint recomputation.
//!
//! Both are thin wrappers over the canonical payload projection so that
//! issuance and verification can never disagree on the rules: there is one
//! projection, one encoder, one hasher.

use crate::errors::EncodingError;
use crate::payload::CanonicalPayload;
use crate::record::CertificateRecord;
use certanchor_canonical::{CertificateId, Fingerprint};

/// Derives the ledger lookup key for a record.
///
/// Deterministic: the same logical certificate always resolves to the same
/// id, which makes re-verification idempotent and keeps a re-submitted
/// certificate from producing a second ledger entry. The derivation input is
/// documented on [`CanonicalPayload::certificate_id`].
pub fn derive_certificate_id(record: &CertificateRecord) -> Result<CertificateId, EncodingError> {
    CanonicalPayload::project(record)?.certificate_id()
}

/// Recomputes the content fingerprint for a record.
pub fn compute_fingerprint(record: &CertificateRecord) -> Result<Fingerprint, EncodingError> {
    CanonicalPayload::project(record)?.fingerprint()
}
