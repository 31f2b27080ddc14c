use anyhow::Result;
use clap::Parser;
use cart_manager::{
    cli::{Args, CliApp},
    utils::{init_logging, Config},
};

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {:#}", e);
        e
    })?;

    let level = if args.verbose { "debug" } else { config.log_level.as_str() };
    init_logging(level, config.offset()?);
    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let app = CliApp::new(config, args.storage_dir)?;
    app.run(args.command)
}
