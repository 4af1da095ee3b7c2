use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !Regex::new($pattern).expect("invalid regex").is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    LedgerAddress,
    "20-byte ledger account or contract address (`0x` + 40 hex chars).",
    r"^0x[0-9a-fA-F]{40}$"
);
newtype!(
    InstitutionId,
    "Stable issuing-institution identifier (URL-safe, 1-64 chars).",
    r"^[A-Za-z0-9][A-Za-z0-9._-]{0,63}$"
);

impl LedgerAddress {
    /// Shortened display form (`0x1234…abcd`) for tables and logs.
    pub fn shorten(&self) -> String {
        let s = &self.0;
        format!("{}\u{2026}{}", &s[..6], &s[s.len() - 4..])
    }
}
