use thiserror::Error;

/// Errors raised while projecting or encoding a certificate for hashing.
///
/// All variants are local and recoverable: they surface before any network
/// call is attempted, so a malformed record can never be partially anchored.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// A required canonical-payload field is absent or blank.
    #[error("missing required field: {field}")]
    MissingField {
        /// Canonical name of the missing field.
        field: &'static str,
    },
    /// A date field does not hold a valid `YYYY-MM-DD` calendar date.
    #[error("{field} ('{value}') is not a valid YYYY-MM-DD date")]
    InvalidDate {
        /// Canonical name of the offending field.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// The student email is empty or not an address. The raw value is
    /// deliberately not echoed.
    #[error("student email is missing or not a valid address")]
    InvalidEmail,
    /// A field value fails its format validation.
    #[error(transparent)]
    Validation(#[from] certanchor_canonical::ValidationError),
    /// Serialization to a JSON value failed.
    #[error("serialization failed: {0}")]
    Serialization(String),
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] certanchor_canonical::CanonicalizationError),
}
