use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
};
use tracing::info;

use crate::{
    config::{Credentials, DeployerConfig},
    errors::ScriptError,
};

/// A type-erased alloy provider over HTTP, with the recommended fillers
pub type RpcProvider = DynProvider;

/// Build the RPC client described by `config`, returning it along with the
/// address that will send the deployment
pub async fn create_rpc_provider(
    config: &DeployerConfig,
) -> Result<(RpcProvider, Address), ScriptError> {
    let endpoint = config.network_endpoint.clone();

    let (provider, sender) = match &config.credentials {
        Credentials::PrivateKey(signer) => {
            let sender = signer.address();
            let provider = ProviderBuilder::new()
                .wallet(EthereumWallet::from(signer.clone()))
                .connect_http(endpoint)
                .erased();
            (provider, sender)
        }
        Credentials::NodeAccount => {
            let provider = ProviderBuilder::new().connect_http(endpoint).erased();
            let accounts = provider
                .get_accounts()
                .await
                .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
            let sender = accounts.first().copied().ok_or_else(|| {
                ScriptError::ClientInitialization(
                    "no PRIVATE_KEY given and the node exposes no unlocked account".to_string(),
                )
            })?;
            (provider, sender)
        }
    };

    // Fetch chain id
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    info!("Built client on chain ID: {}, sender {}", chain_id, sender);

    Ok((provider, sender))
}
