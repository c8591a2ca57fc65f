use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use keepalive::config::{self, DEFAULT_CONFIG_PATH};
use keepalive::Supervisor;

/// Keep a list of shell commands running, restarting them whenever they exit.
#[derive(Debug, Parser)]
#[command(name = "keepalive", version)]
struct Args {
	/// Config file listing the commands to keep alive
	#[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
	config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
	// stdout belongs to forwarded child output
	tracing_subscriber::fmt().with_writer(std::io::stderr).init();

	let args = Args::parse();

	let commands = match config::load_config(&args.config) {
		Ok(commands) => commands,
		Err(e) => {
			tracing::error!("failed to load config: {}", e);
			return ExitCode::FAILURE;
		}
	};

	let supervisor = Supervisor::new(commands);
	if let Err(e) = supervisor.cancel_on_interrupt() {
		tracing::error!("failed to install signal handlers: {}", e);
		return ExitCode::FAILURE;
	}

	match supervisor.run().await {
		Ok(()) => {
			tracing::info!("all commands stopped");
			ExitCode::SUCCESS
		}
		Err(e) => {
			tracing::error!("supervisor failed: {}", e);
			ExitCode::FAILURE
		}
	}
}
