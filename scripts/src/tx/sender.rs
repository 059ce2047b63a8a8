use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    providers::{PendingTransactionBuilder, Provider},
    rpc::types::eth::{BlockId, TransactionReceipt, TransactionRequest},
};
use async_trait::async_trait;
use tracing::warn;

use crate::{
    build::ArtifactStore,
    config::DeployerConfig,
    deploy::{ContractDefinition, DeployedContract, Ledger, PendingDeployment},
    errors::ScriptError,
    tx::client::{create_rpc_provider, RpcProvider},
};

/// The production [`Ledger`]: artifacts from disk, transactions over JSON-RPC
pub struct RpcLedger {
    /// Provider sending and watching the deployment
    client: RpcProvider,
    /// Account the deployment is sent from
    sender: Address,
    /// Where contract definitions are resolved
    artifacts: ArtifactStore,
    /// Blocks awaited on top of the deployment transaction
    confirmations: u64,
}

impl RpcLedger {
    /// Assemble a ledger from an already built client
    pub fn new(
        client: RpcProvider,
        sender: Address,
        artifacts: ArtifactStore,
        confirmations: u64,
    ) -> Self {
        Self {
            client,
            sender,
            artifacts,
            confirmations,
        }
    }

    /// Connect to the node described by `config`
    pub async fn connect(config: &DeployerConfig) -> Result<Self, ScriptError> {
        let (client, sender) = create_rpc_provider(config).await?;

        Ok(Self::new(
            client,
            sender,
            ArtifactStore::new(&config.contract_definition_source),
            config.confirmations,
        ))
    }

    /// Address sending the deployment transactions
    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Turn the receipt of `pending` into the deployed contract
    async fn deployed_from_receipt(
        &self,
        pending: &PendingDeployment,
        receipt: TransactionReceipt,
    ) -> Result<DeployedContract, ScriptError> {
        if !receipt.status() {
            let reason = self.revert_reason(pending, receipt.block_number).await;
            warn!("Deployment transaction {} reverted", receipt.transaction_hash);
            return Err(ScriptError::DeploymentFailed(format!(
                "transaction {} reverted in block {}: {reason}",
                receipt.transaction_hash,
                receipt
                    .block_number
                    .map(|block| block.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            )));
        }

        let address = receipt.contract_address.ok_or_else(|| {
            ScriptError::DeploymentFailed(format!(
                "receipt of {} carries no contract address",
                receipt.transaction_hash
            ))
        })?;

        Ok(DeployedContract::new(
            address,
            receipt.transaction_hash,
            receipt.block_number,
        ))
    }

    /// Replay a reverted creation to recover its revert reason
    async fn revert_reason(&self, pending: &PendingDeployment, block_number: Option<u64>) -> String {
        let tx = deploy_transaction(pending.sender(), pending.init_code().clone());
        let mut call = self.client.call(tx);
        if let Some(block_number) = block_number {
            call = call.block(BlockId::number(block_number.saturating_sub(1)));
        }

        match call.await {
            Err(e) => e.to_string(),
            Ok(_) => "no revert reason recovered".to_string(),
        }
    }
}

#[async_trait]
impl Ledger for RpcLedger {
    async fn resolve(&self, name: &str) -> Result<ContractDefinition, ScriptError> {
        self.artifacts.resolve(name)
    }

    async fn submit(
        &self,
        definition: &ContractDefinition,
    ) -> Result<PendingDeployment, ScriptError> {
        let tx_request = deploy_transaction(self.sender, definition.bytecode().clone());

        // Send it
        let pending_tx = self
            .client
            .send_transaction(tx_request)
            .await
            .map_err(|e| ScriptError::DeploymentFailed(e.to_string()))?;

        Ok(PendingDeployment::new(
            *pending_tx.tx_hash(),
            self.sender,
            definition.bytecode().clone(),
        ))
    }

    async fn confirm(&self, pending: PendingDeployment) -> Result<DeployedContract, ScriptError> {
        // Wait for the transaction to be included.
        let receipt = PendingTransactionBuilder::new(self.client.root().clone(), pending.tx_hash())
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::DeploymentFailed(e.to_string()))?;

        self.deployed_from_receipt(&pending, receipt).await
    }
}

/// Build the CREATE transaction of `init_code`, sent by `sender`
pub fn deploy_transaction(sender: Address, init_code: Bytes) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(sender)
        .with_deploy_code(init_code)
}

#[cfg(test)]
mod tests {
    use alloy::{
        primitives::{address, bytes, TxHash, TxKind, B256},
        providers::{mock::Asserter, ProviderBuilder},
    };
    use serde_json::json;

    use super::*;

    const SENDER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn ledger(asserter: &Asserter) -> RpcLedger {
        let client = ProviderBuilder::new()
            .connect_mocked_client(asserter.clone())
            .erased();
        RpcLedger::new(client, SENDER, ArtifactStore::new("artifacts"), 1)
    }

    fn pending() -> PendingDeployment {
        PendingDeployment::new(TxHash::with_last_byte(9), SENDER, bytes!("6080604052"))
    }

    /// A receipt as returned by `eth_getTransactionReceipt`, mined in block 16
    fn receipt(status: bool, contract_address: Option<Address>) -> TransactionReceipt {
        let receipt = json!({
            "type": "0x2",
            "status": if status { "0x1" } else { "0x0" },
            "cumulativeGasUsed": "0x1e8480",
            "logs": [],
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "transactionHash": TxHash::with_last_byte(9),
            "transactionIndex": "0x0",
            "blockHash": B256::with_last_byte(1),
            "blockNumber": "0x10",
            "gasUsed": "0x1e8480",
            "effectiveGasPrice": "0x3b9aca00",
            "from": SENDER,
            "to": null,
            "contractAddress": contract_address,
        });
        serde_json::from_str(&receipt.to_string()).unwrap()
    }

    #[test]
    fn deploy_transaction_is_a_creation() {
        let code = bytes!("6080604052");

        let tx = deploy_transaction(SENDER, code.clone());

        assert_eq!(tx.from, Some(SENDER));
        assert_eq!(TransactionBuilder::kind(&tx), Some(TxKind::Create));
        assert_eq!(TransactionBuilder::input(&tx), Some(&code));
        assert_eq!(tx.value, None);
    }

    #[tokio::test]
    async fn successful_receipt_yields_the_contract() {
        let asserter = Asserter::new();
        let contract = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

        let deployed = ledger(&asserter)
            .deployed_from_receipt(&pending(), receipt(true, Some(contract)))
            .await
            .unwrap();

        assert_eq!(deployed.address(), contract);
        assert_eq!(deployed.tx_hash(), TxHash::with_last_byte(9));
        assert_eq!(deployed.block_number(), Some(16));
    }

    #[tokio::test]
    async fn reverted_receipt_reports_the_replayed_reason() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("execution reverted: collab is closed");

        let err = ledger(&asserter)
            .deployed_from_receipt(&pending(), receipt(false, None))
            .await
            .unwrap_err();

        assert!(matches!(err, ScriptError::DeploymentFailed(_)));
        let message = err.to_string();
        assert!(message.contains("reverted in block 16"));
        assert!(message.contains("collab is closed"));
    }

    #[tokio::test]
    async fn receipt_without_contract_address_fails() {
        let asserter = Asserter::new();

        let err = ledger(&asserter)
            .deployed_from_receipt(&pending(), receipt(true, None))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("carries no contract address"));
    }
}
