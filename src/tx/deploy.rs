//! Deploying instances of declared classes through the Universal Deployer

use starknet::{contract::ContractFactory, core::types::Felt};
use tracing::info;

use crate::{errors::ScriptError, tx::client::ScriptAccount};

/// Deploy an instance of `class_hash` with the given constructor calldata,
/// returning the deployed address
pub async fn deploy_contract(
    account: &ScriptAccount,
    class_hash: Felt,
    constructor_calldata: &[Felt],
    salt: Felt,
) -> Result<Felt, ScriptError> {
    let factory = ContractFactory::new(class_hash, account.clone());

    // The deployed address only depends on the class, salt, calldata and deployer,
    // so it is known before the transaction lands
    let deployment = factory.deploy_v3(constructor_calldata.to_vec(), salt, true);
    let deployed_address = deployment.deployed_address();

    let result = deployment
        .send()
        .await
        .map_err(|e| ScriptError::Deployment(e.to_string()))?;

    info!(
        "Deployed class {:#x} at {:#x} (tx {:#x})",
        class_hash, deployed_address, result.transaction_hash
    );

    Ok(deployed_address)
}
