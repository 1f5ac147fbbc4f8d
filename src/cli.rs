//! Definitions of CLI arguments and the run pipeline for the deploy scripts

use clap::Parser;
use starknet::core::types::Felt;
use tracing::info;

use crate::{
    commands::{declare_contracts, deploy_contracts},
    config::NetworkConfig,
    constants::COMPILED_CONTRACTS,
    errors::ScriptError,
    registry::ArtifactRegistry,
    tx::DeployClient,
};

/// Scripts for declaring & deploying the resolver delegation Starknet contracts
#[derive(Parser)]
pub struct Cli {
    /// Re-declare classes even when a declaration is already recorded
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Run the declare & deploy pipeline against the configured network
    pub async fn run<C: DeployClient>(
        self,
        config: &NetworkConfig,
        client: &C,
    ) -> Result<(), ScriptError> {
        info!("Using account {:#x} as deployer", config.account_address);

        let mut registry = ArtifactRegistry::load(&config.deployments_dir())?;

        info!("Declaring contracts...");
        declare_contracts(client, &mut registry, COMPILED_CONTRACTS, self.force).await?;

        // Every resolver takes the deployer as admin; account classes are
        // declared above but cannot be instantiated through the UDC
        let deployments: Vec<(String, Vec<Felt>)> = COMPILED_CONTRACTS
            .iter()
            .filter(|spec| !spec.is_account_contract)
            .map(|spec| (spec.name.to_string(), vec![config.account_address]))
            .collect();

        info!("Deploying contracts...");
        deploy_contracts(client, &mut registry, &deployments).await?;

        info!("Deployment complete on {}", config.network);
        Ok(())
    }
}
