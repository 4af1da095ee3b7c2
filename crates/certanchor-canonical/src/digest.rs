//! Domain-separated SHA-256 digests.
//!
//! Every 32-byte value in the system is computed as
//! `sha256(domain_separator || canonical_bytes)`. Distinct domain separators
//! keep a certificate id from ever colliding in representation with a
//! content fingerprint, even over identical input bytes.

use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;

/// Domain separator for content fingerprints.
const CONTENT_DOMAIN: &[u8] = b"certanchor:content:v1\0";
/// Domain separator for certificate ids.
const CERT_ID_DOMAIN: &[u8] = b"certanchor:cert-id:v1\0";
/// Domain separator for email digests.
const EMAIL_DOMAIN: &[u8] = b"certanchor:email:v1\0";

fn sha256_with_domain(domain: &[u8], bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(bytes);
    hasher.finalize().into()
}

macro_rules! hash32_newtype {
    ($name:ident, $doc:expr, $domain:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name([u8; 32]);

        impl $name {
            /// Digests `bytes` under this type's domain separator.
            pub fn digest(bytes: &[u8]) -> Self {
                Self(sha256_with_domain($domain, bytes))
            }

            /// Wraps raw digest bytes.
            pub fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Raw digest bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// `0x`-prefixed lowercase hex rendering (fixed width, 66 chars).
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }

            /// Parses a hex rendering. Accepts mixed case and an optional
            /// `0x` prefix; the stored form is always lowercase, so
            /// comparisons are case-insensitive by construction.
            pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
                let s = value.as_ref().trim();
                let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
                if digits.len() != 64 {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s.to_string(),
                    });
                }
                let mut bytes = [0u8; 32];
                hex::decode_to_slice(digits, &mut bytes).map_err(|_| {
                    ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s.to_string(),
                    }
                })?;
                Ok(Self(bytes))
            }

            /// True when every digest byte is zero (the ledger's "absent" sentinel).
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.to_hex()
            }
        }
    };
}

hash32_newtype!(
    Fingerprint,
    "Content fingerprint: SHA-256 over the canonical payload bytes. \
     Certifies *what a certificate contains*; the tamper-evidence anchor.",
    CONTENT_DOMAIN
);
hash32_newtype!(
    CertificateId,
    "Certificate id: SHA-256 over the stable identity fields. \
     Identifies *which certificate*; the ledger lookup key.",
    CERT_ID_DOMAIN
);
hash32_newtype!(
    EmailDigest,
    "One-way digest of a normalized student email. The raw email never \
     appears in any hashed payload; only this digest does.",
    EMAIL_DOMAIN
);

impl CertificateId {
    /// Parses user-supplied input: either a bare hex id or a verification
    /// URL whose final path segment is the id (the QR-code payload).
    pub fn from_user_input(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim().trim_end_matches('/');
        let candidate = match trimmed.rsplit('/').next() {
            Some(segment) if trimmed.contains('/') => segment,
            _ => trimmed,
        };
        Self::parse(candidate)
    }
}
