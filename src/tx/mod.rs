//! Network-facing transaction plumbing for the deploy scripts

use async_trait::async_trait;
use starknet::core::types::Felt;

use crate::errors::ScriptError;

pub mod client;

/// Our declare utils
pub mod declare;

/// Our deploy utils
pub mod deploy;

/// The declare & deploy operations the drivers run against the network
#[async_trait]
pub trait DeployClient {
    /// Declare the named contract class, returning its class hash
    async fn declare(&self, contract_name: &str) -> Result<Felt, ScriptError>;

    /// Deploy an instance of a declared class, returning its address
    async fn deploy(
        &self,
        class_hash: Felt,
        constructor_calldata: &[Felt],
    ) -> Result<Felt, ScriptError>;
}
