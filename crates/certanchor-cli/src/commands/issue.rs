//! Issue command implementation.

use super::load_record;
use certanchor_registry::{issue_certificate, HttpRegistry};
use serde_json::json;

pub async fn run(
    record_path: String,
    uri: String,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = load_record(&record_path)?;

    let registry = HttpRegistry::from_env()
        .map_err(|e| format!("Registry configuration error: {}", e))?
        .ok_or(
            "Registry not configured: set CERTANCHOR_RPC_URL and CERTANCHOR_REGISTRY_ADDRESS \
             (and CERTANCHOR_FROM_ADDRESS for write authority)",
        )?;

    let issued = issue_certificate(&registry, &record, &uri)
        .await
        .map_err(|e| format!("Issuance failed, certificate NOT issued: {}", e))?;

    if json_output {
        let out = json!({
            "certificateId": issued.id,
            "fingerprint": issued.fingerprint,
            "transactionHash": issued.receipt.transaction_hash,
            "chain": issued.receipt.chain,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{:<16} {}", "CERTIFICATE_ID", issued.id);
        println!("{:<16} {}", "FINGERPRINT", issued.fingerprint);
        println!("{:<16} {}", "TX_HASH", issued.receipt.transaction_hash);
        println!("{:<16} {}", "CHAIN", issued.receipt.chain);
    }
    Ok(())
}
