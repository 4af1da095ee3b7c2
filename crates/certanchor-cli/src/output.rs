//! Output formatting utilities.

use certanchor_core::VerificationVerdict;

/// Prints a verdict as a small table.
pub fn print_verdict(verdict: &VerificationVerdict) {
    println!("{:<14} {}", "STATUS", verdict.status_label());
    println!("{:<14} {}", "CERTIFICATE", shorten(&verdict.id().to_hex()));

    match verdict {
        VerificationVerdict::Verified { fingerprint, on_chain, .. } => {
            println!("{:<14} {}", "FINGERPRINT", shorten(&fingerprint.to_hex()));
            println!("{:<14} {}", "ISSUER", on_chain.issuer.shorten());
            println!("{:<14} {}", "ISSUED_AT", on_chain.issued_at);
            println!("{:<14} {}", "URI", on_chain.uri);
        }
        VerificationVerdict::Rejected { fingerprint, on_chain, reason, .. } => {
            println!("{:<14} {}", "REASON", reason);
            println!("{:<14} {}", "LOCAL", shorten(&fingerprint.to_hex()));
            println!(
                "{:<14} {}",
                "ANCHORED",
                shorten(&on_chain.content_fingerprint.to_hex())
            );
        }
        VerificationVerdict::NotFound { .. } => {
            println!("{:<14} no local or on-chain record for this id", "DETAIL");
        }
        VerificationVerdict::Unconfirmed { fingerprint, .. } => {
            println!("{:<14} {}", "LOCAL", shorten(&fingerprint.to_hex()));
            println!(
                "{:<14} registry unavailable; integrity NOT confirmed",
                "DETAIL"
            );
        }
    }
}

/// Shortens a hex string for table display (`0x1234…abcd`).
pub fn shorten(hex: &str) -> String {
    if hex.len() <= 12 {
        return hex.to_string();
    }
    format!("{}\u{2026}{}", &hex[..6], &hex[hex.len() - 4..])
}
