//! Deployment of a single contract definition

/// The deployment driver
mod deployer;
/// The ledger-interaction service
mod ledger;
/// Values exchanged with the ledger
mod request;

pub use deployer::{DeployState, Deployer};
pub use ledger::Ledger;
pub use request::{ContractDefinition, DeployedContract, DeploymentRequest, PendingDeployment};
