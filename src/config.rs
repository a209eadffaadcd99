//! Configuration management for the game client

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::types::Address;

/// Main configuration for the game client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Network to use when none is named explicitly
    pub default_network: String,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Interval between transaction confirmation polls, in milliseconds
    pub confirm_poll_interval_ms: u64,
    /// Number of confirmation polls before giving up
    pub confirm_poll_attempts: u32,
    /// Known networks, keyed by name
    pub networks: BTreeMap<String, NetworkConfig>,
}

/// Configuration for a single network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Fullnode JSON-RPC endpoint
    pub rpc_url: String,
    /// Address of the deployed game package, if the package is available
    /// on this network
    pub package_id: Option<Address>,
    /// Explorer URL template; `{id}` is replaced with an object ID
    pub explorer: Option<String>,
}

impl NetworkConfig {
    /// Explorer link for an object, if this network has an explorer.
    pub fn explorer_url(&self, id: &Address) -> Option<String> {
        self.explorer
            .as_ref()
            .map(|template| template.replace("{id}", id.as_str()))
    }

    /// Package address for building transactions. Networks without a
    /// deployed package cannot play.
    pub fn package_id(&self) -> ClientResult<&Address> {
        self.package_id.as_ref().ok_or_else(|| ClientError::Configuration {
            message: "game package is not deployed on this network".to_string(),
            field: "package_id".to_string(),
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();

        networks.insert(
            "localnet".to_string(),
            NetworkConfig {
                rpc_url: "http://127.0.0.1:9000".to_string(),
                package_id: None,
                explorer: Some(
                    "https://suiscan.xyz/custom/object/{id}/?network=0.0.0.0%3A9000".to_string(),
                ),
            },
        );

        networks.insert(
            "devnet".to_string(),
            NetworkConfig {
                rpc_url: "https://fullnode.devnet.sui.io:443".to_string(),
                package_id: None,
                explorer: Some("https://suiscan.xyz/devnet/object/{id}/".to_string()),
            },
        );

        networks.insert(
            "testnet".to_string(),
            NetworkConfig {
                rpc_url: "https://fullnode.testnet.sui.io:443".to_string(),
                package_id: None,
                explorer: Some("https://suiscan.xyz/testnet/object/{id}/".to_string()),
            },
        );

        Self {
            default_network: "localnet".to_string(),
            request_timeout_ms: 10_000,
            confirm_poll_interval_ms: 500,
            confirm_poll_attempts: 20,
            networks,
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ClientResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ClientError::Configuration {
            message: format!("failed to read config file: {}", e),
            field: "config_file".to_string(),
        })?;

        let config: ClientConfig =
            toml::from_str(&content).map_err(|e| ClientError::Configuration {
                message: format!("failed to parse config file: {}", e),
                field: "config_format".to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> ClientResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ClientError::Configuration {
            message: format!("failed to serialize config: {}", e),
            field: "config_serialization".to_string(),
        })?;

        fs::write(path, content).map_err(|e| ClientError::Configuration {
            message: format!("failed to write config file: {}", e),
            field: "config_write".to_string(),
        })?;

        Ok(())
    }

    /// Look up a network by name.
    pub fn network(&self, name: &str) -> ClientResult<&NetworkConfig> {
        self.networks.get(name).ok_or_else(|| ClientError::Configuration {
            message: format!("unknown network '{}'", name),
            field: "networks".to_string(),
        })
    }

    /// Network used when none is named explicitly.
    pub fn default_network(&self) -> ClientResult<&NetworkConfig> {
        self.network(&self.default_network)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> ClientResult<()> {
        if self.request_timeout_ms == 0 {
            return Err(ClientError::Configuration {
                message: "request timeout must be greater than 0".to_string(),
                field: "request_timeout_ms".to_string(),
            });
        }

        if self.confirm_poll_attempts == 0 {
            return Err(ClientError::Configuration {
                message: "confirmation poll attempts must be greater than 0".to_string(),
                field: "confirm_poll_attempts".to_string(),
            });
        }

        if self.networks.is_empty() {
            return Err(ClientError::Configuration {
                message: "at least one network must be configured".to_string(),
                field: "networks".to_string(),
            });
        }

        if !self.networks.contains_key(&self.default_network) {
            return Err(ClientError::Configuration {
                message: format!(
                    "default network '{}' is not in the network table",
                    self.default_network
                ),
                field: "default_network".to_string(),
            });
        }

        for (name, network) in &self.networks {
            if !network.rpc_url.starts_with("http://") && !network.rpc_url.starts_with("https://")
            {
                return Err(ClientError::Configuration {
                    message: format!("network '{}' has a non-HTTP rpc_url", name),
                    field: format!("networks.{}.rpc_url", name),
                });
            }
        }

        Ok(())
    }
}
