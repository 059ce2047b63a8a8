//! Definitions of CLI arguments and the exit status reporting of the deploy script

use std::{ffi::OsString, io::Write, path::PathBuf, process::ExitCode};

use alloy::signers::local::PrivateKeySigner;
use clap::Parser;
use reqwest::Url;

use crate::{
    config::{Credentials, DeployerConfig},
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_CONFIRMATIONS, DEFAULT_RPC, DEPLOYED_LABEL, ERROR_LABEL,
    },
    deploy::DeployedContract,
    errors::ScriptError,
};

/// Deploy the AlgorithmicMusicCollab contract and print its address
#[derive(Parser, Debug)]
#[command(name = "deploy")]
pub struct Cli {
    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC)]
    pub rpc_url: String,

    /// Private key of the deployer, the node's first account signs when unset
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Directory of the compiled contract artifacts
    #[arg(short, long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Blocks to wait for on top of the deployment transaction
    #[arg(long, env = "CONFIRMATIONS", default_value_t = DEFAULT_CONFIRMATIONS)]
    pub confirmations: u64,

    /// JSON file recording the deployed address
    #[arg(long, env = "DEPLOYMENTS_FILE")]
    pub deployments_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse `args`, the program name first.
    ///
    /// Help and version requests print and exit right away, any other parsing
    /// failure becomes a [`ScriptError::Configuration`].
    pub fn try_from_args<I, T>(args: I) -> Result<Self, ScriptError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| {
            if !e.use_stderr() {
                e.exit()
            }
            ScriptError::Configuration(clap_error_message(&e))
        })
    }

    /// Validate the arguments into the deployer configuration
    pub fn to_config(&self) -> Result<DeployerConfig, ScriptError> {
        let network_endpoint = self
            .rpc_url
            .parse::<Url>()
            .map_err(|e| ScriptError::Configuration(format!("RPC URL {}: {e}", self.rpc_url)))?;

        let credentials = match self.priv_key.as_deref().map(str::trim) {
            None | Some("") => Credentials::NodeAccount,
            Some(key) => {
                let signer = key
                    .parse::<PrivateKeySigner>()
                    .map_err(|e| ScriptError::Configuration(format!("private key: {e}")))?;
                Credentials::PrivateKey(signer)
            }
        };

        if self.confirmations == 0 {
            return Err(ScriptError::Configuration(
                "at least one confirmation is required".to_string(),
            ));
        }

        Ok(DeployerConfig {
            network_endpoint,
            credentials,
            contract_definition_source: self.artifacts.clone(),
            confirmations: self.confirmations,
        })
    }
}

/// First line of a clap error, without its `error:` prefix
fn clap_error_message(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.trim_start_matches("error:").trim().to_string()
}

/// Process status of a deployment run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The contract is deployed and its address printed
    Success,
    /// Anything else
    Failure,
}

impl ExitStatus {
    /// Process exit code of this status
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Print the outcome of deploying `contract`: the address on `out`, or the error on `err`
pub fn report(
    contract: &str,
    outcome: &Result<DeployedContract, ScriptError>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> ExitStatus {
    match outcome {
        Ok(deployed) => {
            let printed = writeln!(out, "{contract} {DEPLOYED_LABEL} {}", deployed.address())
                .and_then(|()| out.flush());
            match printed {
                Ok(()) => ExitStatus::Success,
                Err(e) => {
                    let _ = writeln!(err, "{ERROR_LABEL} could not print the address: {e}");
                    ExitStatus::Failure
                }
            }
        }
        Err(e) => {
            let _ = writeln!(err, "{ERROR_LABEL} {e}");
            ExitStatus::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, Address, TxHash};

    use super::*;

    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("deploy").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn private_key_signs_locally() {
        let config = cli(&["--rpc-url", "http://localhost:8545", "--priv-key", DEV_KEY])
            .to_config()
            .unwrap();

        match config.credentials {
            Credentials::PrivateKey(signer) => assert_eq!(
                signer.address(),
                address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
            ),
            Credentials::NodeAccount => panic!("expected a local signer"),
        }
        assert_eq!(config.network_endpoint.as_str(), "http://localhost:8545/");
    }

    #[test]
    fn blank_private_key_uses_node_account() {
        let config = cli(&["--priv-key", "  "]).to_config().unwrap();

        assert!(matches!(config.credentials, Credentials::NodeAccount));
    }

    #[test]
    fn invalid_private_key_is_rejected() {
        let err = cli(&["--priv-key", "0xnot-a-key"]).to_config().unwrap_err();

        assert!(matches!(err, ScriptError::Configuration(_)));
    }

    #[test]
    fn invalid_rpc_url_is_rejected() {
        let err = cli(&["--rpc-url", "not a url"]).to_config().unwrap_err();

        assert!(err.to_string().contains("RPC URL"));
    }

    #[test]
    fn zero_confirmations_is_rejected() {
        let err = cli(&["--confirmations", "0"]).to_config().unwrap_err();

        assert!(matches!(err, ScriptError::Configuration(_)));
    }

    #[test]
    fn artifacts_directory_is_the_definition_source() {
        let config = cli(&["--artifacts", "out", "--confirmations", "3"])
            .to_config()
            .unwrap();

        assert_eq!(config.contract_definition_source, PathBuf::from("out"));
        assert_eq!(config.confirmations, 3);
    }

    #[test]
    fn exit_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::Failure.code(), 1);
    }

    #[test]
    fn success_goes_to_stdout_only() {
        let deployed = DeployedContract::new(
            address!("abcdef0000000000000000000000000000000001"),
            TxHash::ZERO,
            Some(1),
        );
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let status = report("AlgorithmicMusicCollab", &Ok(deployed.clone()), &mut out, &mut err);

        assert_eq!(status, ExitStatus::Success);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("AlgorithmicMusicCollab deployed to: {}\n", deployed.address())
        );
        assert!(err.is_empty());
    }

    #[test]
    fn unparsable_value_is_a_configuration_error() {
        let err = Cli::try_from_args(["deploy", "--confirmations", "abc"]).unwrap_err();

        match err {
            ScriptError::Configuration(message) => {
                assert!(message.contains("abc"));
                assert!(!message.starts_with("error:"));
                assert_eq!(message.lines().count(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn stray_argument_is_a_configuration_error() {
        let err = Cli::try_from_args(["deploy", "AlgorithmicMusicCollab"]).unwrap_err();

        assert!(matches!(err, ScriptError::Configuration(_)));
    }

    /// A stdout whose reader went away
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn unprinted_address_is_a_failure() {
        let deployed = DeployedContract::new(Address::with_last_byte(1), TxHash::ZERO, Some(1));
        let mut err = Vec::new();

        let status = report("AlgorithmicMusicCollab", &Ok(deployed), &mut ClosedPipe, &mut err);

        assert_eq!(status, ExitStatus::Failure);
        assert!(String::from_utf8(err)
            .unwrap()
            .starts_with("Error during deployment:"));
    }
}
