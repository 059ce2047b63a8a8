//! Explicit configuration of a deployment run

use std::path::PathBuf;

use alloy::signers::local::PrivateKeySigner;
use reqwest::Url;

/// Everything the deployer needs to reach the ledger, resolved once at startup
#[derive(Debug, Clone)]
pub struct DeployerConfig {
    /// JSON-RPC endpoint of the node
    pub network_endpoint: Url,
    /// How deployment transactions get signed
    pub credentials: Credentials,
    /// Directory of compiled contract artifacts
    pub contract_definition_source: PathBuf,
    /// Blocks to wait on top of the deployment transaction
    pub confirmations: u64,
}

/// Signing mode of the deployment transaction
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Sign locally with the given key
    PrivateKey(PrivateKeySigner),
    /// Let the node sign with its first unlocked account
    NodeAccount,
}
