//! The ledger-interaction service consumed by the deployer

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    deploy::request::{ContractDefinition, DeployedContract, PendingDeployment},
    errors::ScriptError,
};

/// Resolution, submission and confirmation of contract deployments
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Resolve a contract definition by name
    async fn resolve(&self, name: &str) -> Result<ContractDefinition, ScriptError>;

    /// Submit the creation of `definition`, returning once the ledger accepted it
    async fn submit(
        &self,
        definition: &ContractDefinition,
    ) -> Result<PendingDeployment, ScriptError>;

    /// Wait until `pending` is finalized
    async fn confirm(&self, pending: PendingDeployment) -> Result<DeployedContract, ScriptError>;
}

#[async_trait]
impl<L: Ledger + ?Sized> Ledger for Arc<L> {
    async fn resolve(&self, name: &str) -> Result<ContractDefinition, ScriptError> {
        (**self).resolve(name).await
    }

    async fn submit(
        &self,
        definition: &ContractDefinition,
    ) -> Result<PendingDeployment, ScriptError> {
        (**self).submit(definition).await
    }

    async fn confirm(&self, pending: PendingDeployment) -> Result<DeployedContract, ScriptError> {
        (**self).confirm(pending).await
    }
}
