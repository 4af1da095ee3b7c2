//! Canonical payload projection and fingerprinting.
//!
//! The payload is the minimal, ordered, PII-reduced projection of a
//! certificate record used as hash input. Only the fields listed here are
//! covered by the integrity guarantee; everything else on the record
//! (student display name, institution display name, status) is deliberately
//! outside it.

use crate::errors::EncodingError;
use crate::record::{CertificateRecord, CertificateType};
use certanchor_canonical::{
    canonicalize, normalize_email, CertificateId, EmailDigest, Fingerprint, InstitutionId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// PII-minimizing projection of a [`CertificateRecord`] used as hash input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPayload {
    /// Stable issuing-institution identifier.
    pub institution_id: InstitutionId,
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
    /// One-way digest of the normalized student email; never the raw email.
    pub student_email_hash: EmailDigest,
}

fn required(value: &str, field: &'static str) -> Result<String, EncodingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EncodingError::MissingField { field });
    }
    Ok(trimmed.to_string())
}

fn calendar_date(value: &str, field: &'static str) -> Result<String, EncodingError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| EncodingError::InvalidDate {
        field,
        value: value.to_string(),
    })?;
    Ok(trimmed.to_string())
}

impl CanonicalPayload {
    /// Projects a record into its canonical payload.
    ///
    /// Fails fast on missing or malformed fields so that nothing malformed
    /// is ever hashed or anchored. The student email is normalized (trim,
    /// lowercase) and replaced by its one-way digest.
    pub fn project(record: &CertificateRecord) -> Result<Self, EncodingError> {
        let institution_id = InstitutionId::parse(required(&record.institution_id, "institutionId")?)?;
        let course_name = required(&record.course_name, "courseName")?;
        let grade = required(&record.grade, "grade")?;
        let issue_date = calendar_date(&record.issue_date, "issueDate")?;
        let completion_date = calendar_date(&record.completion_date, "completionDate")?;

        let normalized = normalize_email(&record.student_email);
        if normalized.is_empty() || !normalized.contains('@') {
            return Err(EncodingError::InvalidEmail);
        }
        let student_email_hash = EmailDigest::from_email(&record.student_email)?;

        Ok(Self {
            institution_id,
            course_name,
            grade,
            issue_date,
            completion_date,
            certificate_type: record.certificate_type,
            student_email_hash,
        })
    }

    /// Canonical bytes of this payload.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        let value =
            serde_json::to_value(self).map_err(|e| EncodingError::Serialization(e.to_string()))?;
        Ok(canonicalize(&value)?)
    }

    /// Content fingerprint: `sha256(content_domain || canonical_bytes)`.
    ///
    /// Pure and deterministic; this recomputation, not any stored value, is
    /// the source of truth for what a certificate should hash to.
    pub fn fingerprint(&self) -> Result<Fingerprint, EncodingError> {
        Ok(Fingerprint::digest(&self.canonical_bytes()?))
    }

    /// Certificate id: digest of the stable identity fields under the id
    /// domain separator.
    ///
    /// Identity covers institutionId, courseName, issueDate, completionDate,
    /// certificateType, and the email digest. The grade is content, not
    /// identity: it participates in the fingerprint but not in the lookup
    /// key. Mutable fields (verification status) are excluded from both.
    pub fn certificate_id(&self) -> Result<CertificateId, EncodingError> {
        let mut value =
            serde_json::to_value(self).map_err(|e| EncodingError::Serialization(e.to_string()))?;
        if let Value::Object(map) = &mut value {
            map.remove("grade");
        }
        let bytes = canonicalize(&value)?;
        Ok(CertificateId::digest(&bytes))
    }
}
