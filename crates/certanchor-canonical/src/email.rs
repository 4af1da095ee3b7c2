//! Email normalization and one-way digesting.
//!
//! Student emails are PII and never enter a hashed payload or leave the
//! process in raw form. The canonical payload carries only the digest of
//! the normalized address.

use crate::canonicalizer::{canonicalize, CanonicalizationError};
use crate::digest::EmailDigest;
use serde_json::json;

/// Normalizes an email for digesting: trim surrounding whitespace, lowercase.
///
/// `"Alice@X.com"`, `" alice@x.com "`, and `"alice@x.com"` all normalize to
/// the same string, so their digests are identical.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl EmailDigest {
    /// Digests a raw email address after normalization.
    ///
    /// The digest input is the canonical encoding of `{"email": normalized}`
    /// under the email domain separator, so it can never be confused with a
    /// fingerprint or id computed over the same address.
    pub fn from_email(raw: &str) -> Result<Self, CanonicalizationError> {
        let normalized = normalize_email(raw);
        let bytes = canonicalize(&json!({ "email": normalized }))?;
        Ok(EmailDigest::digest(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_is_idempotent_across_variants() {
        let a = EmailDigest::from_email("Alice@X.com").unwrap();
        let b = EmailDigest::from_email(" alice@x.com ").unwrap();
        let c = EmailDigest::from_email("alice@x.com").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn distinct_addresses_digest_differently() {
        let a = EmailDigest::from_email("alice@x.com").unwrap();
        let b = EmailDigest::from_email("bob@x.com").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn digest_rendering_never_contains_the_address() {
        let digest = EmailDigest::from_email("carol@university.edu").unwrap();
        let hex = digest.to_hex();
        assert!(!hex.contains("carol"));
        assert!(!hex.contains("university"));
    }
}
