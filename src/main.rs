//! Command-line entry point.
//!
//! ```bash
//! # Run the server (default command)
//! snaplink
//! snaplink --listen 127.0.0.1:8080 serve
//!
//! # Validate configuration and print a summary
//! snaplink check-config
//!
//! # Print a few candidate short codes
//! snaplink gen-code -n 5
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use snaplink::config::{Config, load_from_env};
use snaplink::server;
use snaplink::utils::code_generator::{CodeGenerator, DEFAULT_CODE_LENGTH};

/// In-memory link shortener.
#[derive(Parser)]
#[command(name = "snaplink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bind address, overrides `LISTEN`
    #[arg(long, global = true)]
    listen: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve,

    /// Validate configuration and print a summary
    CheckConfig,

    /// Print sample short codes
    GenCode {
        /// How many codes to print
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,

        /// Code length
        #[arg(short, long, default_value_t = DEFAULT_CODE_LENGTH)]
        length: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let config = load_config(cli.listen)?;
            init_tracing(&config);
            config.print_summary();
            server::run(config).await
        }
        Commands::CheckConfig => {
            let config = load_config(cli.listen)?;
            init_tracing(&config);
            config.print_summary();
            println!("Configuration OK");
            Ok(())
        }
        Commands::GenCode { count, length } => {
            let generator = CodeGenerator::new(length);
            for _ in 0..count {
                println!("{}", generator.generate());
            }
            Ok(())
        }
    }
}

fn load_config(listen: Option<String>) -> Result<Config> {
    let mut config = load_from_env()?;
    if let Some(addr) = listen {
        config.listen_addr = addr;
        config.validate()?;
    }
    Ok(config)
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
