//! Declaring compiled contract classes

use std::{fs, path::Path, sync::Arc};

use starknet::{
    accounts::Account,
    core::types::{
        contract::{CompiledClass, SierraClass},
        Felt, FlattenedSierraClass,
    },
};
use tracing::info;

use crate::{errors::ScriptError, tx::client::ScriptAccount};

/// Load the flattened Sierra class and its compiled class hash from the build directory
fn load_artifacts(build_dir: &Path, name: &str) -> Result<(FlattenedSierraClass, Felt), ScriptError> {
    let sierra_path = build_dir.join(format!("{name}.contract_class.json"));
    let sierra_raw = fs::read_to_string(&sierra_path)
        .map_err(|e| ScriptError::ArtifactLoading(format!("{}: {}", sierra_path.display(), e)))?;
    let sierra: SierraClass = serde_json::from_str(&sierra_raw)
        .map_err(|e| ScriptError::ArtifactLoading(format!("{}: {}", sierra_path.display(), e)))?;

    let casm_path = build_dir.join(format!("{name}.compiled_contract_class.json"));
    let casm_raw = fs::read_to_string(&casm_path)
        .map_err(|e| ScriptError::ArtifactLoading(format!("{}: {}", casm_path.display(), e)))?;
    let casm: CompiledClass = serde_json::from_str(&casm_raw)
        .map_err(|e| ScriptError::ArtifactLoading(format!("{}: {}", casm_path.display(), e)))?;

    let compiled_class_hash = casm
        .class_hash()
        .map_err(|e| ScriptError::ArtifactLoading(e.to_string()))?;
    let flattened = sierra
        .flatten()
        .map_err(|e| ScriptError::ArtifactLoading(e.to_string()))?;

    Ok((flattened, compiled_class_hash))
}

/// Declare the named contract class, returning the class hash reported by the network
pub async fn declare_contract(
    account: &ScriptAccount,
    build_dir: &Path,
    name: &str,
) -> Result<Felt, ScriptError> {
    let (flattened, compiled_class_hash) = load_artifacts(build_dir, name)?;

    // Send the declare transaction
    let result = account
        .declare_v3(Arc::new(flattened), compiled_class_hash)
        .send()
        .await
        .map_err(|e| ScriptError::Declaration(e.to_string()))?;

    info!(
        "Declared {} with class hash {:#x} (tx {:#x})",
        name, result.class_hash, result.transaction_hash
    );

    Ok(result.class_hash)
}
