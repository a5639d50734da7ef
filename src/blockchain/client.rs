//! Blockchain RPC client with a signing provider.
//!
//! # Responsibilities
//! - Connect to the network's JSON-RPC endpoint
//! - Refuse to operate when the endpoint serves a different chain
//! - Send contract-creation transactions and wait for their receipts

use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId, CreationReceipt};
use crate::blockchain::wallet::Wallet;
use crate::config::NetworkConfig;

/// RPC client bound to one network and one deployer wallet.
#[derive(Clone)]
pub struct ChainClient {
    /// Provider with the deployer wallet attached.
    provider: DynProvider,
    /// Deployer wallet.
    wallet: Wallet,
    /// Endpoint URL, for logging.
    rpc_url: String,
    /// Chain ID the configuration expects.
    expected_chain_id: u64,
    /// Timeout for read-only queries.
    rpc_timeout: Duration,
    /// Maximum wait for a creation receipt.
    receipt_timeout: Duration,
}

impl ChainClient {
    /// Build a client for `network`. No RPC call is made here.
    pub fn connect(
        network: &NetworkConfig,
        wallet: Wallet,
        rpc_timeout_secs: u64,
        receipt_timeout_secs: u64,
    ) -> BlockchainResult<Self> {
        let url: url::Url = network.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", network.rpc_url, e))
        })?;

        let provider = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(url)
            .erased();

        Ok(Self {
            provider,
            wallet,
            rpc_url: network.rpc_url.clone(),
            expected_chain_id: network.chain_id,
            rpc_timeout: Duration::from_secs(rpc_timeout_secs),
            receipt_timeout: Duration::from_secs(receipt_timeout_secs),
        })
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.expected_chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.expected_chain_id,
                actual: chain_id.0,
            });
        }
        tracing::info!(
            rpc_url = %self.rpc_url,
            chain_id = chain_id.0,
            "Connected to expected chain"
        );
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        match timeout(self.rpc_timeout, self.provider.get_chain_id()).await {
            Ok(Ok(id)) => Ok(ChainId(id)),
            Ok(Err(e)) => Err(BlockchainError::Rpc(e.to_string())),
            Err(_) => Err(BlockchainError::Timeout(self.rpc_timeout.as_secs())),
        }
    }

    /// Get the transaction count (nonce) for an address.
    pub async fn get_transaction_count(&self, address: Address) -> BlockchainResult<u64> {
        match timeout(self.rpc_timeout, self.provider.get_transaction_count(address)).await {
            Ok(Ok(nonce)) => Ok(nonce),
            Ok(Err(e)) => Err(BlockchainError::Rpc(e.to_string())),
            Err(_) => Err(BlockchainError::Timeout(self.rpc_timeout.as_secs())),
        }
    }

    /// Send a contract-creation transaction carrying `code` and wait for it to be mined.
    ///
    /// Nonce, gas and fees are filled by the provider.
    pub async fn deploy_code(&self, code: Bytes) -> BlockchainResult<CreationReceipt> {
        let tx = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_deploy_code(code);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| BlockchainError::Rpc(format!("Failed to send creation tx: {}", e)))?;
        let tx_hash = *pending.tx_hash();

        tracing::info!(tx_hash = %tx_hash, "Creation transaction sent");

        let receipt = pending
            .with_timeout(Some(self.receipt_timeout))
            .get_receipt()
            .await
            .map_err(|e| BlockchainError::Rpc(format!("Failed to get receipt for {}: {}", tx_hash, e)))?;

        if !receipt.status() {
            return Err(BlockchainError::Reverted(tx_hash));
        }

        let contract_address = receipt
            .contract_address
            .ok_or(BlockchainError::NoContractAddress(tx_hash))?;

        Ok(CreationReceipt {
            tx_hash,
            contract_address,
            block_number: receipt.block_number,
        })
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.expected_chain_id)
            .field("deployer", &self.wallet.address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn network(rpc_url: &str) -> NetworkConfig {
        NetworkConfig {
            name: "test".to_string(),
            chain_id: 31337,
            rpc_url: rpc_url.to_string(),
            explorer: None,
            zksync: false,
        }
    }

    fn wallet() -> Wallet {
        Wallet::from_private_key(TEST_PRIVATE_KEY, 31337).unwrap()
    }

    #[tokio::test]
    async fn test_client_creation_makes_no_call() {
        // Nothing listens on this port; connect must still succeed.
        let result = ChainClient::connect(&network("http://127.0.0.1:1"), wallet(), 1, 1);
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_rpc_url() {
        let err = ChainClient::connect(&network("not a url"), wallet(), 1, 1).unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[tokio::test]
    async fn test_unreachable_rpc_is_error() {
        let client = ChainClient::connect(&network("http://127.0.0.1:1"), wallet(), 2, 1).unwrap();
        assert!(client.verify_chain_id().await.is_err());
    }
}
