use clap::Parser;
use qlessons::cli::{self, Cli};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = cli.demo_config();
    tracing::debug!(?config, command = ?cli.command, "starting lesson");

    match cli::run(&cli.command, &config) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "lesson failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
