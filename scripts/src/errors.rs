//! Definitions of errors that can occur during the execution of the deploy scripts

use thiserror::Error;

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The configuration supplied by flags or environment is unusable
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// Error when creating the client
    #[error("error during client init: {0}")]
    ClientInitialization(String),
    /// The named contract definition could not be resolved
    #[error("contract definition `{name}` not found: {reason}")]
    DefinitionNotFound {
        /// The requested contract name
        name: String,
        /// Why resolution failed
        reason: String,
    },
    /// Error deploying a contract, from submission to confirmation
    #[error("error deploying contract: {0}")]
    DeploymentFailed(String),
    /// Error when building output file
    #[error("error writing json output: {0}")]
    JsonOutputError(String),
}

impl ScriptError {
    /// Shorthand for a [`ScriptError::DefinitionNotFound`]
    pub fn definition_not_found(name: &str, reason: impl Into<String>) -> Self {
        ScriptError::DefinitionNotFound {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
