use clap::Parser;
use log::*;

use semtag::action::{Inputs, Outputs, WorkflowEnv};
use semtag::cli;
use semtag::forge::{config::RemoteConfig, github::Github};
use semtag::orchestrator::Orchestrator;
use semtag::repo::GitRepo;
use semtag::result::Result;

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("semtag")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = cli::Args::parse();

    initialize_logger(args.debug)?;

    let mut inputs = Inputs::from_env()?;
    if args.dry_run {
        inputs.dry_run = true;
    }

    let env = WorkflowEnv::from_env()?;
    debug!("running against {}/{} at {}", env.owner, env.repo, env.sha);

    let remote =
        RemoteConfig::new(&env.owner, &env.repo, &inputs.github_token);
    let forge = Github::new(remote)?;

    let orchestrator = Orchestrator::new(
        inputs,
        env,
        Box::new(GitRepo),
        Box::new(forge),
    )?;

    // Flush whatever was recorded even when the run fails: outputs are
    // written incrementally and a key's absence means its stage was never
    // reached, not that the run succeeded.
    let mut outputs = Outputs::new();
    let result = orchestrator.run(&mut outputs).await;
    outputs.flush()?;

    result
}
