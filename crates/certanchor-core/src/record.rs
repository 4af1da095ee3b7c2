//! Certificate record types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of credential kinds an institution can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateType {
    /// Full academic degree.
    Degree,
    /// Diploma program.
    Diploma,
    /// Course or program certificate.
    Certificate,
    /// Academic transcript.
    Transcript,
}

impl fmt::Display for CertificateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CertificateType::Degree => "degree",
            CertificateType::Diploma => "diploma",
            CertificateType::Certificate => "certificate",
            CertificateType::Transcript => "transcript",
        };
        f.write_str(s)
    }
}

/// Lifecycle status of a certificate in the hosting application.
///
/// The only field of a record that may change after issuance; it is
/// therefore excluded from both the fingerprint and the id derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Issued but not yet confirmed against the registry.
    #[default]
    Pending,
    /// Confirmed: anchored fingerprint matches and the record is not revoked.
    Verified,
    /// Rejected: fingerprint mismatch or on-chain revocation.
    Rejected,
}

/// The authoritative off-chain credential.
///
/// Owned by the issuing institution's session; immutable once issued except
/// for [`VerificationStatus`]. The core never stores these: one record at a
/// time is passed in by the caller, and persistence is entirely the hosting
/// application's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    /// Student display name. Not part of any integrity guarantee.
    pub student_name: String,
    /// Student email. Never hashed or transmitted raw; see `CanonicalPayload`.
    pub student_email: String,
    /// Institution display name. Not part of any integrity guarantee.
    pub institution_name: String,
    /// Stable issuing-institution identifier.
    pub institution_id: String,
    /// Course or program name.
    pub course_name: String,
    /// Awarded grade.
    pub grade: String,
    /// Issuance date, `YYYY-MM-DD`.
    pub issue_date: String,
    /// Completion date, `YYYY-MM-DD`.
    pub completion_date: String,
    /// Credential kind.
    pub certificate_type: CertificateType,
    /// Mutable lifecycle status; excluded from hashing and derivation.
    #[serde(default)]
    pub verification_status: VerificationStatus,
}
