//! Values passed between the deployer and the ledger

use std::path::{Path, PathBuf};

use alloy::{
    json_abi::JsonAbi,
    primitives::{Address, Bytes, TxHash},
};

/// A request to deploy the named contract definition, without constructor arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    /// Name of the contract definition to deploy
    contract_name: String,
}

impl DeploymentRequest {
    /// Request the deployment of `contract_name`
    pub fn new(contract_name: impl Into<String>) -> Self {
        Self {
            contract_name: contract_name.into(),
        }
    }

    /// Name of the requested contract definition
    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }
}

/// A compiled contract definition, as resolved from its artifact
#[derive(Debug, Clone)]
pub struct ContractDefinition {
    /// Contract name
    name: String,
    /// Interface of the contract
    abi: JsonAbi,
    /// Init code
    bytecode: Bytes,
    /// Artifact file
    source: PathBuf,
}

impl ContractDefinition {
    /// Assemble a definition from its artifact parts
    pub fn new(name: impl Into<String>, abi: JsonAbi, bytecode: Bytes, source: PathBuf) -> Self {
        Self {
            name: name.into(),
            abi,
            bytecode,
            source,
        }
    }

    /// Contract name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Interface of the contract
    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// The init code sent in the creation transaction
    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    /// The artifact file this definition was read from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Number of arguments the constructor expects
    pub fn constructor_arity(&self) -> usize {
        self.abi
            .constructor()
            .map(|constructor| constructor.inputs.len())
            .unwrap_or(0)
    }
}

/// A deployment accepted by the ledger but not yet confirmed.
///
/// Holds no contract address: one is only known once the deployment is confirmed.
#[derive(Debug, Clone)]
pub struct PendingDeployment {
    /// Hash of the creation transaction
    tx_hash: TxHash,
    /// Account that sent it
    sender: Address,
    /// Init code it carries
    init_code: Bytes,
}

impl PendingDeployment {
    /// A submitted creation transaction
    pub fn new(tx_hash: TxHash, sender: Address, init_code: Bytes) -> Self {
        Self {
            tx_hash,
            sender,
            init_code,
        }
    }

    /// Hash of the creation transaction
    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Account that sent the creation transaction
    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Init code carried by the creation transaction
    pub fn init_code(&self) -> &Bytes {
        &self.init_code
    }
}

/// A confirmed on-chain deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    /// Address of the created contract
    address: Address,
    /// Hash of the creation transaction
    tx_hash: TxHash,
    /// Block including the creation, when the node reports it
    block_number: Option<u64>,
}

impl DeployedContract {
    /// A confirmed deployment
    pub fn new(address: Address, tx_hash: TxHash, block_number: Option<u64>) -> Self {
        Self {
            address,
            tx_hash,
            block_number,
        }
    }

    /// Address of the created contract
    pub fn address(&self) -> Address {
        self.address
    }

    /// Hash of the creation transaction
    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Block including the creation
    pub fn block_number(&self) -> Option<u64> {
        self.block_number
    }
}
