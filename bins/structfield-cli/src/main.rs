mod config;
mod domain;
mod error;
mod rules;

mod cmd {
    pub mod convert;
    pub mod schema;
}

use clap::Parser;
use config::{Cli, Commands, Effective};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Convert(args) => Effective::new(&args).and_then(|eff| cmd::convert::run(&eff)),
        Commands::Schema => cmd::schema::run(),
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
