//! Drivers for the declare & deploy phases.
//!
//! Each phase walks its contract list sequentially and checkpoints the record
//! file once, after the whole phase succeeded. A failure mid-phase therefore
//! aborts without touching what a previous run (or phase) already persisted.

use starknet::core::types::Felt;
use tracing::info;

use crate::{
    constants::ContractSpec, errors::ScriptError, registry::ArtifactRegistry, tx::DeployClient,
};

/// Declare every contract whose class is not yet recorded, then checkpoint the records.
///
/// With `force` set, recorded declarations are ignored and every class is
/// re-declared, overwriting its record.
pub async fn declare_contracts<C: DeployClient>(
    client: &C,
    registry: &mut ArtifactRegistry,
    contracts: &[ContractSpec],
    force: bool,
) -> Result<(), ScriptError> {
    for spec in contracts {
        if !force {
            if let Some(class_hash) = registry.class_hash(spec.name) {
                info!(
                    "Class for {} already declared as {:#x}, skipping",
                    spec.name, class_hash
                );
                continue;
            }
        }

        info!("Declaring {}...", spec.name);
        let class_hash = client.declare(spec.name).await?;
        registry.record_declaration(spec.name, class_hash);
    }

    registry.persist_declarations()
}

/// Deploy an instance for every (name, constructor calldata) pair, then checkpoint the records.
///
/// A name with no recorded declaration fails the run before any network call.
pub async fn deploy_contracts<C: DeployClient>(
    client: &C,
    registry: &mut ArtifactRegistry,
    deployments: &[(String, Vec<Felt>)],
) -> Result<(), ScriptError> {
    for (name, calldata) in deployments {
        let class_hash = registry
            .class_hash(name)
            .ok_or_else(|| ScriptError::UndeclaredClass(name.clone()))?;

        info!("Deploying {}...", name);
        let address = client.deploy(class_hash, calldata).await?;
        registry.record_deployment(name, address, class_hash);
    }

    registry.persist_deployments()
}
