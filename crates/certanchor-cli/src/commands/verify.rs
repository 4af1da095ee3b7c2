//! Verify command implementation.

use super::load_record;
use crate::output;
use certanchor_canonical::CertificateId;
use certanchor_core::CertificateRecord;
use certanchor_registry::{verify_certificate, HttpRegistry, UnconfiguredRegistry};

pub async fn run(
    id_input: String,
    record_path: Option<String>,
    json_output: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = CertificateId::from_user_input(&id_input)
        .map_err(|e| format!("Invalid certificate id: {}", e))?;

    let record: Option<CertificateRecord> = match record_path {
        Some(path) => Some(load_record(&path)?),
        None => None,
    };

    let verdict = match HttpRegistry::from_env()
        .map_err(|e| format!("Registry configuration error: {}", e))?
    {
        Some(registry) => verify_certificate(&registry, id, record.as_ref()).await?,
        None => verify_certificate(&UnconfiguredRegistry, id, record.as_ref()).await?,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        output::print_verdict(&verdict);
    }

    if strict && !verdict.is_verified() {
        std::process::exit(1);
    }
    Ok(())
}
