pub mod canonicalize;
pub mod derive_id;
pub mod fingerprint;
pub mod issue;
pub mod verify;

use certanchor_core::CertificateRecord;

/// Loads and parses a certificate record from a JSON file.
pub fn load_record(path: &str) -> Result<CertificateRecord, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file {}: {}", path, e))?;
    let record: CertificateRecord =
        serde_json::from_str(&text).map_err(|e| format!("Invalid certificate record: {}", e))?;
    Ok(record)
}
