// src/main.rs — autocoder entry point

use clap::Parser;

use autocoder::cli::Cli;
use autocoder::infra::logger;
use autocoder::provider::resolver;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG / AUTOCODER_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli.resolve_config()?;
    config.validate()?;

    // A provider that cannot be built (no API key) ends the process here;
    // everything after this point is non-fatal.
    let provider = resolver::build_provider(&config.model)?;

    autocoder::cli::run::run_generation(provider, &config, cli.quiet).await?;
    Ok(())
}
