//! Contract deployment over JSON-RPC.

use crate::artifacts::ContractArtifact;
use crate::blockchain::types::BlockchainResult;
use crate::blockchain::{ChainClient, CreationReceipt};
use crate::deploy::args::{creation_code, ConstructorArg};

/// Something that can put a contract on chain.
#[allow(async_fn_in_trait)]
pub trait ContractDeployer {
    /// Deploy `artifact` with `args` and wait until it is mined.
    async fn deploy(
        &self,
        artifact: &ContractArtifact,
        args: &[ConstructorArg],
    ) -> BlockchainResult<CreationReceipt>;
}

impl ContractDeployer for ChainClient {
    async fn deploy(
        &self,
        artifact: &ContractArtifact,
        args: &[ConstructorArg],
    ) -> BlockchainResult<CreationReceipt> {
        let code = creation_code(artifact, args);
        tracing::debug!(
            contract = %artifact.name,
            code_len = code.len(),
            "Sending creation transaction"
        );
        self.deploy_code(code).await
    }
}
