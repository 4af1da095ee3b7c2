//! JSON-RPC registry client for EVM-compatible chains.
//!
//! Anchors go through the registry contract's `issue(bytes32,bytes32,string)`
//! via `eth_sendTransaction`; the RPC endpoint's key management signs the
//! transaction, this client never holds keys. Reads go through
//! `get(bytes32)` via `eth_call` and decode the returned tuple
//! `(bytes32 contentHash, address issuer, uint64 issuedAt, bool revoked,
//! string uri)` by hand. An all-zero contentHash, an empty return, or an
//! execution revert all mean "never anchored" and decode to `None`;
//! transport failures surface as `Unavailable` and are never conflated with
//! absence.

use crate::client::{Registry, TxReceipt};
use crate::config::RegistryConfig;
use crate::error::{AnchorError, RegistryError};
use async_trait::async_trait;
use certanchor_canonical::{CertificateId, Fingerprint, LedgerAddress};
use certanchor_core::OnChainRecord;
use serde_json::Value;
use tracing::{debug, warn};

/// 4-byte selector for `issue(bytes32,bytes32,string)`.
/// keccak256("issue(bytes32,bytes32,string)") = 0xbb97b77c...
const ISSUE_SELECTOR: &str = "bb97b77c";
/// 4-byte selector for `get(bytes32)`.
/// keccak256("get(bytes32)") = 0x8eaa6ac0...
const GET_SELECTOR: &str = "8eaa6ac0";

const WORD: usize = 32;

/// JSON-RPC registry client.
#[derive(Debug)]
pub struct HttpRegistry {
    client: reqwest::Client,
    config: RegistryConfig,
}

/// A JSON-RPC response: either a result or an application-level error.
/// Transport failures never reach this type.
enum RpcOutcome {
    Result(Value),
    Error { message: String },
}

impl HttpRegistry {
    /// Builds a client from configuration.
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RegistryError::Unavailable {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, config })
    }

    /// Builds a client from the environment; `Ok(None)` when unconfigured.
    pub fn from_env() -> Result<Option<Self>, RegistryError> {
        match RegistryConfig::from_env()? {
            Some(config) => Ok(Some(Self::new(config)?)),
            None => Ok(None),
        }
    }

    /// The configured chain name.
    pub fn chain(&self) -> &str {
        &self.config.chain.name
    }

    /// Sends one JSON-RPC request. `Err` is transport-only; JSON-RPC level
    /// errors come back as `RpcOutcome::Error` for the caller to classify.
    async fn rpc_call(&self, method: &str, params: Value) -> Result<RpcOutcome, RegistryError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });
        debug!(method, chain = %self.config.chain.name, "registry rpc call");

        let resp = self
            .client
            .post(&self.config.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    format!("{method}: request timed out")
                } else {
                    format!("{method}: {e}")
                };
                warn!(method, %reason, "registry transport failure");
                RegistryError::Unavailable { reason }
            })?;

        if !resp.status().is_success() {
            let reason = format!("{method}: HTTP {}", resp.status());
            warn!(method, %reason, "registry transport failure");
            return Err(RegistryError::Unavailable { reason });
        }

        let json: Value = resp.json().await.map_err(|e| RegistryError::Protocol {
            reason: format!("{method}: invalid JSON response: {e}"),
        })?;

        if let Some(error) = json.get("error") {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown RPC error")
                .to_string();
            return Ok(RpcOutcome::Error { message });
        }

        json.get("result")
            .cloned()
            .map(RpcOutcome::Result)
            .ok_or_else(|| RegistryError::Protocol {
                reason: format!("{method}: response missing 'result' field"),
            })
    }
}

#[async_trait]
impl Registry for HttpRegistry {
    async fn anchor(
        &self,
        id: &CertificateId,
        fingerprint: &Fingerprint,
        uri: &str,
    ) -> Result<TxReceipt, AnchorError> {
        let from = self.config.from_address.as_ref().ok_or_else(|| {
            AnchorError::SigningRejected {
                reason: "no sender address configured; client is read-only".into(),
            }
        })?;

        let tx = serde_json::json!({
            "from": from.as_ref(),
            "to": self.config.contract_address.as_ref(),
            "data": encode_issue_calldata(id, fingerprint, uri),
        });

        let outcome = self
            .rpc_call("eth_sendTransaction", serde_json::json!([tx]))
            .await
            .map_err(AnchorError::Registry)?;

        match outcome {
            RpcOutcome::Error { message } => Err(classify_send_error(message)),
            RpcOutcome::Result(result) => {
                let transaction_hash = result
                    .as_str()
                    .map(|s| s.to_string())
                    .ok_or_else(|| {
                        AnchorError::Registry(RegistryError::Protocol {
                            reason: "eth_sendTransaction returned non-string result".into(),
                        })
                    })?;
                Ok(TxReceipt {
                    transaction_hash,
                    chain: self.config.chain.name.clone(),
                })
            }
        }
    }

    async fn fetch(&self, id: &CertificateId) -> Result<Option<OnChainRecord>, RegistryError> {
        let call = serde_json::json!({
            "to": self.config.contract_address.as_ref(),
            "data": encode_get_calldata(id),
        });

        let outcome = self
            .rpc_call("eth_call", serde_json::json!([call, "latest"]))
            .await?;

        match outcome {
            // Contracts that revert on unknown ids are treated as absence,
            // not as a transport failure.
            RpcOutcome::Error { message } if is_revert(&message) => Ok(None),
            RpcOutcome::Error { message } => Err(RegistryError::Protocol {
                reason: format!("eth_call: {message}"),
            }),
            RpcOutcome::Result(result) => {
                let data = result.as_str().ok_or_else(|| RegistryError::Protocol {
                    reason: "eth_call returned non-string result".into(),
                })?;
                decode_record(data)
            }
        }
    }
}

fn classify_send_error(message: String) -> AnchorError {
    let lower = message.to_lowercase();
    if lower.contains("denied") || lower.contains("rejected by user") {
        AnchorError::SigningRejected { reason: message }
    } else {
        AnchorError::Rejected { reason: message }
    }
}

fn is_revert(message: &str) -> bool {
    message.to_lowercase().contains("revert")
}

/// ABI-encodes the `issue(bytes32,bytes32,string)` calldata.
fn encode_issue_calldata(id: &CertificateId, fingerprint: &Fingerprint, uri: &str) -> String {
    let uri_bytes = uri.as_bytes();
    let padding = (WORD - uri_bytes.len() % WORD) % WORD;

    let mut data = String::with_capacity(2 + 8 + (4 + uri_bytes.len() / WORD + 2) * 64);
    data.push_str("0x");
    data.push_str(ISSUE_SELECTOR);
    data.push_str(&hex::encode(id.as_bytes()));
    data.push_str(&hex::encode(fingerprint.as_bytes()));
    // Head: offset of the dynamic string (3 head words).
    data.push_str(&format!("{:064x}", 3 * WORD));
    // Tail: length word, then the string bytes zero-padded to a word.
    data.push_str(&format!("{:064x}", uri_bytes.len()));
    data.push_str(&hex::encode(uri_bytes));
    data.push_str(&"0".repeat(padding * 2));
    data
}

/// ABI-encodes the `get(bytes32)` calldata.
fn encode_get_calldata(id: &CertificateId) -> String {
    format!("0x{}{}", GET_SELECTOR, hex::encode(id.as_bytes()))
}

fn word(raw: &[u8], index: usize) -> Result<&[u8], RegistryError> {
    // Word indexes derive from endpoint-supplied offsets; the arithmetic
    // must not be allowed to overflow on hostile values.
    index
        .checked_mul(WORD)
        .and_then(|start| Some(start..start.checked_add(WORD)?))
        .and_then(|range| raw.get(range))
        .ok_or_else(|| RegistryError::Protocol {
            reason: format!("return data truncated at word {index}"),
        })
}

fn word_as_u64(raw: &[u8], index: usize, name: &str) -> Result<u64, RegistryError> {
    let w = word(raw, index)?;
    if w[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(RegistryError::Protocol {
            reason: format!("{name} overflows u64"),
        });
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&w[WORD - 8..]);
    Ok(u64::from_be_bytes(bytes))
}

/// Decodes the `get(bytes32)` return tuple. `Ok(None)` when the registry
/// holds nothing for the id.
fn decode_record(data: &str) -> Result<Option<OnChainRecord>, RegistryError> {
    let digits = data.trim().trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(None);
    }
    let raw = hex::decode(digits).map_err(|e| RegistryError::Protocol {
        reason: format!("return data is not hex: {e}"),
    })?;
    if raw.len() < 5 * WORD {
        return Err(RegistryError::Protocol {
            reason: format!("return data too short: {} bytes", raw.len()),
        });
    }

    let mut hash_bytes = [0u8; 32];
    hash_bytes.copy_from_slice(word(&raw, 0)?);
    let content_fingerprint = Fingerprint::from_bytes(hash_bytes);
    if content_fingerprint.is_zero() {
        return Ok(None);
    }

    let issuer_word = word(&raw, 1)?;
    let issuer = LedgerAddress::parse(format!("0x{}", hex::encode(&issuer_word[12..])))
        .map_err(|e| RegistryError::Protocol {
            reason: format!("issuer address: {e}"),
        })?;

    let issued_at = word_as_u64(&raw, 2, "issuedAt")?;
    let revoked = word(&raw, 3)?.iter().any(|b| *b != 0);

    // The offset word comes from the endpoint; bound it before any
    // arithmetic so a hostile response yields an error, never a panic.
    let uri_offset = word_as_u64(&raw, 4, "uri offset")? as usize;
    if uri_offset % WORD != 0 || uri_offset >= raw.len() {
        return Err(RegistryError::Protocol {
            reason: format!("uri offset out of range: {uri_offset}"),
        });
    }
    let uri_len = word_as_u64(&raw, uri_offset / WORD, "uri length")? as usize;
    let uri_start = uri_offset + WORD;
    let uri_end = uri_start
        .checked_add(uri_len)
        .filter(|end| *end <= raw.len())
        .ok_or_else(|| RegistryError::Protocol {
            reason: "uri bytes out of range".into(),
        })?;
    let uri_bytes = &raw[uri_start..uri_end];
    let uri = String::from_utf8(uri_bytes.to_vec()).map_err(|_| RegistryError::Protocol {
        reason: "uri is not valid UTF-8".into(),
    })?;

    Ok(Some(OnChainRecord {
        content_fingerprint,
        issuer,
        issued_at,
        revoked,
        uri,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_id() -> CertificateId {
        CertificateId::digest(b"cert")
    }

    fn sample_fingerprint() -> Fingerprint {
        Fingerprint::digest(b"payload")
    }

    /// Builds a `get(bytes32)` return blob the way the contract would.
    fn encode_return(fingerprint: &Fingerprint, issuer_hex40: &str, issued_at: u64, revoked: bool, uri: &str) -> String {
        let uri_bytes = uri.as_bytes();
        let padding = (WORD - uri_bytes.len() % WORD) % WORD;
        let mut data = String::from("0x");
        data.push_str(&hex::encode(fingerprint.as_bytes()));
        data.push_str(&format!("{:0>64}", issuer_hex40));
        data.push_str(&format!("{:064x}", issued_at));
        data.push_str(&format!("{:064x}", u64::from(revoked)));
        data.push_str(&format!("{:064x}", 5 * WORD));
        data.push_str(&format!("{:064x}", uri_bytes.len()));
        data.push_str(&hex::encode(uri_bytes));
        data.push_str(&"0".repeat(padding * 2));
        data
    }

    #[test]
    fn issue_calldata_has_selector_and_fixed_head() {
        let calldata = encode_issue_calldata(&sample_id(), &sample_fingerprint(), "ipfs://QmX");
        assert!(calldata.starts_with("0xbb97b77c"));
        // selector + 3 head words + length word + 1 padded data word
        assert_eq!(calldata.len(), 2 + 8 + 5 * 64);
        // Offset word points past the three head words.
        assert_eq!(&calldata[2 + 8 + 128..2 + 8 + 192], &format!("{:064x}", 96));
    }

    #[test]
    fn issue_calldata_pads_uri_to_word_boundary() {
        let exactly_32 = "a".repeat(32);
        let calldata = encode_issue_calldata(&sample_id(), &sample_fingerprint(), &exactly_32);
        assert_eq!((calldata.len() - 2 - 8) % 64, 0);
    }

    #[test]
    fn get_calldata_is_selector_plus_id() {
        let id = sample_id();
        let calldata = encode_get_calldata(&id);
        assert!(calldata.starts_with("0x8eaa6ac0"));
        assert_eq!(calldata.len(), 2 + 8 + 64);
        assert!(calldata.ends_with(&hex::encode(id.as_bytes())));
    }

    #[test]
    fn decode_round_trips_an_anchored_record() {
        let fp = sample_fingerprint();
        let data = encode_return(&fp, "deadbeefdeadbeefdeadbeefdeadbeefdeadbeef", 1_704_067_200, false, "ipfs://QmExample");
        let record = decode_record(&data).unwrap().expect("record");
        assert_eq!(record.content_fingerprint, fp);
        assert_eq!(record.issued_at, 1_704_067_200);
        assert!(!record.revoked);
        assert_eq!(record.uri, "ipfs://QmExample");
        assert_eq!(
            record.issuer.as_ref(),
            "0xdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef"
        );
    }

    #[test]
    fn decode_reads_the_revoked_flag() {
        let data = encode_return(&sample_fingerprint(), "00000000000000000000000000000000000000aa", 7, true, "u");
        let record = decode_record(&data).unwrap().expect("record");
        assert!(record.revoked);
    }

    #[test]
    fn zero_fingerprint_decodes_to_absent() {
        let zero = Fingerprint::from_bytes([0u8; 32]);
        let data = encode_return(&zero, "00000000000000000000000000000000000000aa", 0, false, "");
        assert!(decode_record(&data).unwrap().is_none());
    }

    #[test]
    fn empty_return_decodes_to_absent() {
        assert!(decode_record("0x").unwrap().is_none());
        assert!(decode_record("").unwrap().is_none());
    }

    #[test]
    fn truncated_return_is_a_protocol_error() {
        let err = decode_record("0xdeadbeef").unwrap_err();
        assert!(matches!(err, RegistryError::Protocol { .. }));
    }

    /// Five head words with an arbitrary offset word in the fifth slot.
    fn return_with_offset_word(offset_word: &str) -> String {
        let mut data = String::from("0x");
        data.push_str(&hex::encode(sample_fingerprint().as_bytes()));
        data.push_str(&format!("{:0>64}", "aa"));
        data.push_str(&format!("{:064x}", 7));
        data.push_str(&format!("{:064x}", 0));
        data.push_str(offset_word);
        data
    }

    #[test]
    fn huge_uri_offset_is_a_protocol_error() {
        // An offset word of u64::MAX must not be trusted into arithmetic.
        let data = return_with_offset_word(&format!("{:064x}", u64::MAX));
        let err = decode_record(&data).unwrap_err();
        assert!(matches!(err, RegistryError::Protocol { .. }));
    }

    #[test]
    fn misaligned_uri_offset_is_a_protocol_error() {
        let data = return_with_offset_word(&format!("{:064x}", 5 * WORD + 1));
        let err = decode_record(&data).unwrap_err();
        assert!(matches!(err, RegistryError::Protocol { .. }));
    }

    #[test]
    fn huge_uri_length_is_a_protocol_error() {
        // Valid offset, but a length word claiming u64::MAX bytes.
        let mut data = return_with_offset_word(&format!("{:064x}", 5 * WORD));
        data.push_str(&format!("{:064x}", u64::MAX));
        let err = decode_record(&data).unwrap_err();
        assert!(matches!(err, RegistryError::Protocol { .. }));
    }

    #[test]
    fn revert_messages_are_classified_as_absence() {
        assert!(is_revert("execution reverted: unknown id"));
        assert!(is_revert("VM Exception: REVERT"));
        assert!(!is_revert("connection refused"));
    }

    #[test]
    fn user_denial_classifies_as_signing_rejection() {
        let err = classify_send_error("User denied transaction signature".into());
        assert!(matches!(err, AnchorError::SigningRejected { .. }));
        let err = classify_send_error("execution reverted: duplicate id".into());
        assert!(matches!(err, AnchorError::Rejected { .. }));
    }
}
