//! Constants used in the deploy scripts

/// Directory holding the compiled Sierra & CASM artifacts
pub const BUILD_DIR: &str = "target/release";

/// Root directory of the per-network record files
pub const DEPLOYMENTS_DIR: &str = "deployments";

/// Name of the per-network declaration record file
pub const DECLARATIONS_FILE: &str = "declarations.json";

/// Name of the per-network deployment record file
pub const DEPLOYMENTS_FILE: &str = "deployments.json";

/// Default RPC endpoint for mainnet
pub const DEFAULT_MAINNET_RPC: &str = "https://starknet-mainnet.public.blastapi.io/rpc/v0_7";

/// Default RPC endpoint for sepolia
pub const DEFAULT_SEPOLIA_RPC: &str = "https://starknet-sepolia.public.blastapi.io/rpc/v0_7";

/// Default RPC endpoint for a local devnet
pub const DEFAULT_DEVNET_RPC: &str = "http://127.0.0.1:5050/rpc";

/// A named contract processed by the deploy scripts
#[derive(Debug, Clone, Copy)]
pub struct ContractSpec {
    /// Artifact name, unique across the set
    pub name: &'static str,
    /// Account classes are declared but never instantiated through the UDC
    pub is_account_contract: bool,
}

/// The contracts handled by the deploy scripts
pub const COMPILED_CONTRACTS: &[ContractSpec] = &[
    ContractSpec {
        name: "resolver_delegation_SimpleResolverDelegation",
        is_account_contract: false,
    },
    ContractSpec {
        name: "resolver_delegation_ArgentResolverDelegation",
        is_account_contract: false,
    },
    ContractSpec {
        name: "resolver_delegation_BraavosResolverDelegation",
        is_account_contract: false,
    },
];
