use anyhow::Result;
use clap::{Parser, Subcommand};

/// contact-relay - contact form to email relay
#[derive(Parser)]
#[command(name = "contact-relay")]
#[command(about = "Relays contact form submissions to a mailbox over SMTP", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = contact_relay::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    contact_relay::observability::init_observability(
        "contact-relay",
        env!("CARGO_PKG_VERSION"),
        &config.logging.level,
        config.logging.format,
    )?;

    match cli.command {
        Commands::Serve { host, port } => contact_relay::cli::serve(config, host, port).await,
    }
}
