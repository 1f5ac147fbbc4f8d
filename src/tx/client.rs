//! Construction of the account-bound RPC client used to send every transaction

use std::path::PathBuf;

use async_trait::async_trait;
use starknet::{
    accounts::{ExecutionEncoding, SingleOwnerAccount},
    core::types::{BlockId, BlockTag, Felt},
    providers::{
        jsonrpc::{HttpTransport, JsonRpcClient},
        Provider,
    },
    signers::{LocalWallet, SigningKey},
};
use tracing::{info, warn};
use url::Url;

use crate::{
    config::NetworkConfig,
    constants::BUILD_DIR,
    errors::ScriptError,
    tx::{declare::declare_contract, deploy::deploy_contract, DeployClient},
};

/// The account type used to send declare & deploy transactions
pub type ScriptAccount = SingleOwnerAccount<JsonRpcClient<HttpTransport>, LocalWallet>;

/// Production [`DeployClient`] backed by a Starknet JSON-RPC account
pub struct StarknetClient {
    /// The account every transaction is sent from
    account: ScriptAccount,
    /// Directory holding the compiled artifacts
    build_dir: PathBuf,
    /// Fixed deployment salt; a random one is drawn per deployment when absent
    deploy_salt: Option<Felt>,
}

impl StarknetClient {
    /// Connect to the configured network and bind the deployer account
    pub async fn connect(config: &NetworkConfig) -> Result<Self, ScriptError> {
        let url = Url::parse(&config.rpc_url)
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        let provider = JsonRpcClient::new(HttpTransport::new(url));

        // Fetch chain id
        let chain_id = provider
            .chain_id()
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        info!("Built client on chain ID: {:#x}", chain_id);
        if chain_id != config.chain_id {
            warn!(
                "Provider reports chain ID {:#x}, expected {:#x} for {}",
                chain_id, config.chain_id, config.network
            );
        }

        // Bind the signer and the account address to the provider
        let signer = LocalWallet::from_signing_key(SigningKey::from_secret_scalar(
            config.private_key,
        ));
        let mut account = SingleOwnerAccount::new(
            provider,
            signer,
            config.account_address,
            chain_id,
            ExecutionEncoding::New,
        );
        account.set_block_id(BlockId::Tag(BlockTag::Pending));

        Ok(Self {
            account,
            build_dir: PathBuf::from(BUILD_DIR),
            deploy_salt: config.deploy_salt,
        })
    }
}

#[async_trait]
impl DeployClient for StarknetClient {
    async fn declare(&self, contract_name: &str) -> Result<Felt, ScriptError> {
        declare_contract(&self.account, &self.build_dir, contract_name).await
    }

    async fn deploy(
        &self,
        class_hash: Felt,
        constructor_calldata: &[Felt],
    ) -> Result<Felt, ScriptError> {
        let salt = self
            .deploy_salt
            .unwrap_or_else(|| Felt::from(rand::random::<u64>()));
        deploy_contract(&self.account, class_hash, constructor_calldata, salt).await
    }
}
