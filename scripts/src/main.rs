use std::{env, io, process::ExitCode};

use dotenv::dotenv;
use music_collab_scripts::{
    cli::{report, Cli},
    constants::CONTRACT_NAME,
    deploy::{DeployedContract, Deployer},
    errors::ScriptError,
    logger::init_logger,
    output_writer::write_deployment,
    tx::RpcLedger,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    dotenv().ok();

    let outcome = match Cli::try_from_args(env::args_os()) {
        Ok(cli) => {
            init_logger(cli.verbose);
            run(&cli).await
        }
        Err(e) => Err(e),
    };

    report(
        CONTRACT_NAME,
        &outcome,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
    .into()
}

/// Deploy, then record the deployment when asked to
async fn run(cli: &Cli) -> Result<DeployedContract, ScriptError> {
    let deployed = deploy(cli).await?;

    if let Some(path) = &cli.deployments_file {
        match write_deployment(path, CONTRACT_NAME, &deployed) {
            Ok(()) => info!("Deployment recorded in {}", path.display()),
            Err(e) => warn!("Deployment not recorded: {e}"),
        }
    }

    Ok(deployed)
}

/// Build our RPC ledger from the configuration and run a single deployment
async fn deploy(cli: &Cli) -> Result<DeployedContract, ScriptError> {
    let config = cli.to_config()?;
    let ledger = RpcLedger::connect(&config).await?;

    Deployer::new(ledger).run().await
}
