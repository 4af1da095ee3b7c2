//! Fingerprint command implementation.

use super::load_record;
use certanchor_core::CanonicalPayload;
use serde_json::json;

pub fn run(record_path: String, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let record = load_record(&record_path)?;
    let payload = CanonicalPayload::project(&record)
        .map_err(|e| format!("Projection failed: {}", e))?;
    let fingerprint = payload.fingerprint()?;
    let id = payload.certificate_id()?;

    if json_output {
        let out = json!({
            "certificateId": id,
            "fingerprint": fingerprint,
            "payload": payload,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{:<16} {}", "CERTIFICATE_ID", id);
        println!("{:<16} {}", "FINGERPRINT", fingerprint);
    }
    Ok(())
}
