//! Derive-id command implementation.

use super::load_record;
use certanchor_core::derive_certificate_id;

pub fn run(record_path: String) -> Result<(), Box<dyn std::error::Error>> {
    let record = load_record(&record_path)?;
    let id = derive_certificate_id(&record).map_err(|e| format!("Derivation failed: {}", e))?;
    println!("{}", id);
    Ok(())
}
