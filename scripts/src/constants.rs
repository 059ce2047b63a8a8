//! Constants used in the deploy scripts

/// Name of the contract definition deployed by the `deploy` binary
pub const CONTRACT_NAME: &str = "AlgorithmicMusicCollab";

/// Default RPC endpoint, a local development node
pub const DEFAULT_RPC: &str = "http://127.0.0.1:8545";

/// Default directory holding the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Default number of confirmations awaited on the deployment transaction
pub const DEFAULT_CONFIRMATIONS: u64 = 1;

/// Label printed in front of the deployed address
pub const DEPLOYED_LABEL: &str = "deployed to:";

/// Label printed in front of a deployment failure
pub const ERROR_LABEL: &str = "Error during deployment:";
