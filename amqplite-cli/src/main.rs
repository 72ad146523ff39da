mod commands;
mod json;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "amqplite")]
#[command(about = "Amqplite - AMQP 1.0 message codec tooling", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON message description into wire bytes
    Encode {
        /// Input JSON file describing the message (use '-' for stdin)
        #[arg(short, long)]
        input: String,

        /// Output file for the encoded message
        #[arg(short, long)]
        output: String,
    },

    /// Decode an encoded message and report its sections
    Inspect {
        /// Input file with the encoded message (use '-' for stdin)
        #[arg(short, long)]
        input: String,

        /// Emit the message as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Decode an encoded message and print only its body
    Body {
        /// Input file with the encoded message (use '-' for stdin)
        #[arg(short, long)]
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Encode { input, output } => commands::encode::execute(&input, &output),

        Commands::Inspect { input, json } => commands::inspect::execute(&input, json),

        Commands::Body { input } => commands::body::execute(&input),
    }
}
