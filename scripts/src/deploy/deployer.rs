//! Single-attempt deployment driver

use std::fmt::{self, Display, Formatter};

use tracing::{debug, info};

use crate::{
    constants::CONTRACT_NAME,
    deploy::{
        ledger::Ledger,
        request::{ContractDefinition, DeployedContract, DeploymentRequest},
    },
    errors::ScriptError,
};

/// Lifecycle of a single deployment. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployState {
    /// Nothing requested yet
    Idle,
    /// Sending the creation transaction
    Submitting,
    /// Waiting for the creation to be finalized
    AwaitingConfirmation,
    /// Contract deployed
    Succeeded,
    /// Resolution, submission or confirmation failed
    Failed,
}

impl Display for DeployState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = match self {
            DeployState::Idle => "idle",
            DeployState::Submitting => "submitting",
            DeployState::AwaitingConfirmation => "awaiting-confirmation",
            DeployState::Succeeded => "succeeded",
            DeployState::Failed => "failed",
        };
        f.write_str(state)
    }
}

/// Deploys a single contract definition through a [`Ledger`], one attempt per run
pub struct Deployer<L> {
    /// Service resolving and deploying the definition
    ledger: L,
    /// Name of the definition deployed on each run
    contract_name: String,
}

impl<L: Ledger> Deployer<L> {
    /// Build a deployer for the `AlgorithmicMusicCollab` contract
    pub fn new(ledger: L) -> Self {
        Self::for_contract(ledger, CONTRACT_NAME)
    }

    /// Build a deployer for an arbitrary contract definition
    pub fn for_contract(ledger: L, contract_name: impl Into<String>) -> Self {
        Self {
            ledger,
            contract_name: contract_name.into(),
        }
    }

    /// Name of the contract this deployer deploys
    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    /// Resolve, submit and confirm the deployment.
    ///
    /// Each call is an independent deployment, nothing is deduplicated.
    pub async fn run(&self) -> Result<DeployedContract, ScriptError> {
        let request = DeploymentRequest::new(self.contract_name.as_str());
        debug!(state = %DeployState::Idle, contract = request.contract_name());

        match self.deploy(request).await {
            Ok(deployed) => {
                debug!(state = %DeployState::Succeeded, address = %deployed.address());
                Ok(deployed)
            }
            Err(e) => {
                debug!(state = %DeployState::Failed, error = %e);
                Err(e)
            }
        }
    }

    /// Walk a request through resolution, submission and confirmation
    async fn deploy(&self, request: DeploymentRequest) -> Result<DeployedContract, ScriptError> {
        let definition = self.ledger.resolve(request.contract_name()).await?;
        info!(
            "Resolved {} from {}",
            definition.name(),
            definition.source().display()
        );
        check_deployable(&definition)?;

        debug!(state = %DeployState::Submitting);
        let pending = self.ledger.submit(&definition).await?;
        info!("Pending deployment transaction... {}", pending.tx_hash());

        debug!(state = %DeployState::AwaitingConfirmation);
        let deployed = self.ledger.confirm(pending).await?;
        info!(
            "Deployment confirmed in block {:?}",
            deployed.block_number()
        );

        Ok(deployed)
    }
}

/// Refuse definitions that cannot be created without constructor arguments
fn check_deployable(definition: &ContractDefinition) -> Result<(), ScriptError> {
    if definition.bytecode().is_empty() {
        return Err(ScriptError::DeploymentFailed(format!(
            "{} has no bytecode, it is an interface or an abstract contract",
            definition.name()
        )));
    }

    let arity = definition.constructor_arity();
    if arity > 0 {
        return Err(ScriptError::DeploymentFailed(format!(
            "{} constructor expects {arity} argument(s), none are supplied",
            definition.name()
        )));
    }

    Ok(())
}
