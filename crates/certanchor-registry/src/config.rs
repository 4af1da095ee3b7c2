//! Endpoint and chain configuration.
//!
//! Configuration comes from the environment so hosting applications can run
//! registry-less: when the endpoint variables are absent, `from_env` returns
//! `Ok(None)` and callers degrade to the unconfigured mode instead of
//! crashing.

use crate::error::RegistryError;
use certanchor_canonical::LedgerAddress;
use std::env;

/// JSON-RPC endpoint URL.
pub const ENV_RPC_URL: &str = "CERTANCHOR_RPC_URL";
/// Registry contract address.
pub const ENV_REGISTRY_ADDRESS: &str = "CERTANCHOR_REGISTRY_ADDRESS";
/// Sender address whose transactions the endpoint signs (write authority).
pub const ENV_FROM_ADDRESS: &str = "CERTANCHOR_FROM_ADDRESS";
/// Numeric chain id override.
pub const ENV_CHAIN_ID: &str = "CERTANCHOR_CHAIN_ID";

/// Named chain with its numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainProfile {
    /// Human-readable chain name.
    pub name: String,
    /// Numeric chain id.
    pub id: u64,
}

impl ChainProfile {
    /// Infers the chain from the endpoint URL; defaults to mainnet.
    pub fn infer(rpc_url: &str) -> Self {
        if rpc_url.contains("goerli") {
            Self { name: "goerli".into(), id: 5 }
        } else if rpc_url.contains("sepolia") {
            Self { name: "sepolia".into(), id: 11_155_111 }
        } else {
            Self { name: "mainnet".into(), id: 1 }
        }
    }
}

/// Configuration for the JSON-RPC registry client.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Address of the certificate registry contract.
    pub contract_address: LedgerAddress,
    /// Sender address for anchor transactions. `None` means read-only: the
    /// client can fetch but any anchor attempt is refused locally.
    pub from_address: Option<LedgerAddress>,
    /// Target chain.
    pub chain: ChainProfile,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl RegistryConfig {
    /// Creates a read-only configuration with the chain inferred from the
    /// URL and a 30 second timeout.
    pub fn new(rpc_url: impl Into<String>, contract_address: LedgerAddress) -> Self {
        let rpc_url = rpc_url.into();
        let chain = ChainProfile::infer(&rpc_url);
        Self {
            rpc_url,
            contract_address,
            from_address: None,
            chain,
            timeout_secs: 30,
        }
    }

    /// Sets the sender address, enabling anchor writes.
    pub fn with_sender(mut self, from_address: LedgerAddress) -> Self {
        self.from_address = Some(from_address);
        self
    }

    /// Overrides the inferred chain.
    pub fn with_chain(mut self, name: impl Into<String>, id: u64) -> Self {
        self.chain = ChainProfile { name: name.into(), id };
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Reads configuration from the environment.
    ///
    /// Returns `Ok(None)` when the endpoint URL or contract address is
    /// absent: a valid, non-fatal state. Malformed values in present
    /// variables are errors.
    pub fn from_env() -> Result<Option<Self>, RegistryError> {
        let rpc_url = match env::var(ENV_RPC_URL) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => return Ok(None),
        };
        let contract = match env::var(ENV_REGISTRY_ADDRESS) {
            Ok(addr) if !addr.trim().is_empty() => addr,
            _ => return Ok(None),
        };
        let contract_address =
            LedgerAddress::parse(contract.trim()).map_err(|e| RegistryError::InvalidConfig {
                reason: format!("{ENV_REGISTRY_ADDRESS}: {e}"),
            })?;

        let mut config = Self::new(rpc_url, contract_address);

        if let Ok(from) = env::var(ENV_FROM_ADDRESS) {
            if !from.trim().is_empty() {
                let from_address =
                    LedgerAddress::parse(from.trim()).map_err(|e| RegistryError::InvalidConfig {
                        reason: format!("{ENV_FROM_ADDRESS}: {e}"),
                    })?;
                config = config.with_sender(from_address);
            }
        }

        if let Ok(chain_id) = env::var(ENV_CHAIN_ID) {
            if !chain_id.trim().is_empty() {
                let id = chain_id.trim().parse::<u64>().map_err(|_| {
                    RegistryError::InvalidConfig {
                        reason: format!("{ENV_CHAIN_ID}: '{chain_id}' is not a number"),
                    }
                })?;
                let name = config.chain.name.clone();
                config = config.with_chain(name, id);
            }
        }

        Ok(Some(config))
    }
}
