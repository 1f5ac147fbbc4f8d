//! Network configuration resolved from the environment.
//!
//! Everything a run needs is gathered once at process start into an immutable
//! [`NetworkConfig`] which the drivers take by reference. Each credential is
//! looked up through an ordered chain of environment keys (network-specific
//! key first, generic key second) and the key that supplied the value is kept
//! so fallback use can be surfaced in the logs.

use std::{env, fmt, path::PathBuf};

use starknet::core::{chain_id, types::Felt};
use tracing::warn;

use crate::{constants, errors::ScriptError};

/// The Starknet networks targeted by the deploy scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// Production network
    Mainnet,
    /// Public test network
    Sepolia,
    /// Local development node
    Devnet,
}

impl Network {
    /// Parse a network name as found in `STARKNET_NETWORK`
    pub fn parse(name: &str) -> Result<Self, ScriptError> {
        match name.to_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "sepolia" => Ok(Network::Sepolia),
            "devnet" => Ok(Network::Devnet),
            other => Err(ScriptError::ConfigurationInvalid(format!(
                "STARKNET_NETWORK: unknown network `{}`, expected mainnet, sepolia or devnet",
                other
            ))),
        }
    }

    /// The network name, used to namespace record files
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Sepolia => "sepolia",
            Network::Devnet => "devnet",
        }
    }

    /// The RPC endpoint used when none is configured
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Mainnet => constants::DEFAULT_MAINNET_RPC,
            Network::Sepolia => constants::DEFAULT_SEPOLIA_RPC,
            Network::Devnet => constants::DEFAULT_DEVNET_RPC,
        }
    }

    /// The chain id the configured provider is expected to report
    pub fn chain_id(&self) -> Felt {
        match self {
            Network::Mainnet => chain_id::MAINNET,
            // Local devnets fork sepolia and report its chain id
            Network::Sepolia | Network::Devnet => chain_id::SEPOLIA,
        }
    }

    /// Prefix of the network-specific environment keys
    fn env_prefix(&self) -> &'static str {
        match self {
            Network::Mainnet => "MAINNET",
            Network::Sepolia => "SEPOLIA",
            Network::Devnet => "DEVNET",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A configuration value together with the key that supplied it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The raw value found in the environment
    pub value: String,
    /// The key the value was read from
    pub source: String,
}

/// Return the value of the first present key among `keys`, recording which one supplied it
pub fn resolve_first<L>(keys: &[String], lookup: &L) -> Option<Resolved>
where
    L: Fn(&str) -> Option<String>,
{
    keys.iter().find_map(|key| {
        lookup(key).map(|value| Resolved {
            value,
            source: key.clone(),
        })
    })
}

/// Resolve through the key chain, warning when a non-primary key supplied the value
fn resolve_with_warning<L>(keys: &[String], lookup: &L) -> Option<Resolved>
where
    L: Fn(&str) -> Option<String>,
{
    let resolved = resolve_first(keys, lookup)?;
    if resolved.source != keys[0] {
        warn!("{} not set, defaulting to {}", keys[0], resolved.source);
    }
    Some(resolved)
}

/// Parse a field element out of a configuration value
fn parse_felt(key: &str, raw: &str) -> Result<Felt, ScriptError> {
    Felt::from_hex(raw).map_err(|e| ScriptError::ConfigurationInvalid(format!("{}: {}", key, e)))
}

/// Require a resolved value and parse it as a field element
fn required_felt(resolved: Option<Resolved>, keys: &[String]) -> Result<Felt, ScriptError> {
    let resolved =
        resolved.ok_or_else(|| ScriptError::ConfigurationMissing(keys.join(" / ")))?;
    parse_felt(&resolved.source, &resolved.value)
}

/// Immutable configuration for one script run
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// The targeted network
    pub network: Network,
    /// The RPC endpoint transactions are sent to
    pub rpc_url: String,
    /// The chain id the provider is expected to report
    pub chain_id: Felt,
    /// Address of the deployer account
    pub account_address: Felt,
    /// Signing key of the deployer account
    pub private_key: Felt,
    /// Fixed deployment salt; a random one is drawn per deployment when absent
    pub deploy_salt: Option<Felt>,
}

impl NetworkConfig {
    /// Resolve the configuration from the process environment
    pub fn from_env() -> Result<Self, ScriptError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve the configuration through an arbitrary key lookup
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ScriptError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let network = match lookup("STARKNET_NETWORK") {
            Some(name) => Network::parse(&name)?,
            None => Network::Devnet,
        };
        let prefix = network.env_prefix();

        let rpc_keys = [format!("{}_RPC_URL", prefix), "RPC_URL".to_string()];
        let rpc_url = match resolve_with_warning(&rpc_keys, &lookup) {
            Some(resolved) => resolved.value,
            None => network.default_rpc_url().to_string(),
        };

        let address_keys = [
            format!("{}_ACCOUNT_ADDRESS", prefix),
            "ACCOUNT_ADDRESS".to_string(),
        ];
        let account_address =
            required_felt(resolve_with_warning(&address_keys, &lookup), &address_keys)?;

        let key_keys = [
            format!("{}_PRIVATE_KEY", prefix),
            "PRIVATE_KEY".to_string(),
        ];
        let private_key = required_felt(resolve_with_warning(&key_keys, &lookup), &key_keys)?;

        let deploy_salt = lookup("DEPLOY_SALT")
            .map(|raw| parse_felt("DEPLOY_SALT", &raw))
            .transpose()?;

        Ok(Self {
            network,
            rpc_url,
            chain_id: network.chain_id(),
            account_address,
            private_key,
            deploy_salt,
        })
    }

    /// Directory holding the record files for the targeted network
    pub fn deployments_dir(&self) -> PathBuf {
        PathBuf::from(constants::DEPLOYMENTS_DIR).join(self.network.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn keys(primary: &str, fallback: &str) -> [String; 2] {
        [primary.to_string(), fallback.to_string()]
    }

    #[test]
    fn resolve_first_prefers_the_primary_key() {
        let vars = env(&[("MAINNET_ACCOUNT_ADDRESS", "0x1"), ("ACCOUNT_ADDRESS", "0x2")]);
        let resolved = resolve_first(
            &keys("MAINNET_ACCOUNT_ADDRESS", "ACCOUNT_ADDRESS"),
            &|key: &str| vars.get(key).cloned(),
        )
        .unwrap();
        assert_eq!(resolved.value, "0x1");
        assert_eq!(resolved.source, "MAINNET_ACCOUNT_ADDRESS");
    }

    #[test]
    fn resolve_first_reports_the_fallback_source() {
        let vars = env(&[("ACCOUNT_ADDRESS", "0x2")]);
        let resolved = resolve_first(
            &keys("MAINNET_ACCOUNT_ADDRESS", "ACCOUNT_ADDRESS"),
            &|key: &str| vars.get(key).cloned(),
        )
        .unwrap();
        assert_eq!(resolved.value, "0x2");
        assert_eq!(resolved.source, "ACCOUNT_ADDRESS");
    }

    #[test]
    fn resolve_first_returns_none_when_no_key_is_present() {
        let vars = env(&[]);
        assert!(resolve_first(
            &keys("MAINNET_ACCOUNT_ADDRESS", "ACCOUNT_ADDRESS"),
            &|key: &str| vars.get(key).cloned(),
        )
        .is_none());
    }

    #[test]
    fn defaults_to_devnet_when_no_network_is_selected() {
        let vars = env(&[("ACCOUNT_ADDRESS", "0x1"), ("PRIVATE_KEY", "0x2")]);
        let config = NetworkConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
        assert_eq!(config.network, Network::Devnet);
        assert_eq!(config.rpc_url, constants::DEFAULT_DEVNET_RPC);
        assert_eq!(config.account_address, Felt::ONE);
        assert_eq!(config.deploy_salt, None);
    }

    #[test]
    fn network_specific_keys_override_generic_ones() {
        let vars = env(&[
            ("STARKNET_NETWORK", "mainnet"),
            ("MAINNET_ACCOUNT_ADDRESS", "0xabc"),
            ("ACCOUNT_ADDRESS", "0xdef"),
            ("MAINNET_PRIVATE_KEY", "0x2"),
            ("MAINNET_RPC_URL", "https://mainnet.example/rpc"),
        ]);
        let config = NetworkConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.account_address, Felt::from_hex("0xabc").unwrap());
        assert_eq!(config.rpc_url, "https://mainnet.example/rpc");
        assert_eq!(config.chain_id, chain_id::MAINNET);
    }

    #[test]
    fn missing_account_address_aborts_with_configuration_missing() {
        let vars = env(&[("STARKNET_NETWORK", "sepolia"), ("PRIVATE_KEY", "0x2")]);
        let err = NetworkConfig::from_lookup(|key| vars.get(key).cloned()).unwrap_err();
        match err {
            ScriptError::ConfigurationMissing(keys) => {
                assert!(keys.contains("SEPOLIA_ACCOUNT_ADDRESS"));
                assert!(keys.contains("ACCOUNT_ADDRESS"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn malformed_values_abort_with_configuration_invalid() {
        let vars = env(&[("ACCOUNT_ADDRESS", "not-hex"), ("PRIVATE_KEY", "0x2")]);
        let err = NetworkConfig::from_lookup(|key| vars.get(key).cloned()).unwrap_err();
        assert!(matches!(err, ScriptError::ConfigurationInvalid(_)));
    }

    #[test]
    fn unknown_network_names_are_rejected() {
        let vars = env(&[("STARKNET_NETWORK", "goerli")]);
        let err = NetworkConfig::from_lookup(|key| vars.get(key).cloned()).unwrap_err();
        assert!(matches!(err, ScriptError::ConfigurationInvalid(_)));
    }

    #[test]
    fn deploy_salt_is_parsed_when_present() {
        let vars = env(&[
            ("ACCOUNT_ADDRESS", "0x1"),
            ("PRIVATE_KEY", "0x2"),
            ("DEPLOY_SALT", "0x1234"),
        ]);
        let config = NetworkConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
        assert_eq!(config.deploy_salt, Some(Felt::from_hex("0x1234").unwrap()));
    }

    #[test]
    fn record_files_are_namespaced_by_network() {
        let vars = env(&[
            ("STARKNET_NETWORK", "sepolia"),
            ("ACCOUNT_ADDRESS", "0x1"),
            ("PRIVATE_KEY", "0x2"),
        ]);
        let config = NetworkConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
        assert_eq!(
            config.deployments_dir(),
            PathBuf::from("deployments").join("sepolia")
        );
    }
}
