use std::path::PathBuf;

use thiserror::Error;

/// The config file could not be turned into a command list.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read {}: {source}", .path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse {}: {source}", .path.display())]
	Yaml {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("failed to parse {}: {source}", .path.display())]
	Toml {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("no commands defined in {}", .path.display())]
	NoCommands { path: PathBuf },

	#[error("command #{index} has an empty name")]
	EmptyName { index: usize },

	#[error("{name}: empty cmd")]
	EmptyCommand { name: String },

	#[error("duplicate command name: {name}")]
	DuplicateName { name: String },
}

/// The OS refused to start a process for a command.
#[derive(Debug, Error)]
#[error("failed to launch {name}: {source}")]
pub struct LaunchError {
	pub name: String,
	#[source]
	pub source: std::io::Error,
}

/// SIGTERM could not be delivered to a live child.
#[derive(Debug, Error)]
#[error("failed to terminate {name} (pid {pid}): {source}")]
pub struct TerminationError {
	pub name: String,
	pub pid: u32,
	#[source]
	pub source: nix::errno::Errno,
}

/// Why a keepalive loop gave up. A child exiting is never one of these.
#[derive(Debug, Error)]
pub enum KeepaliveError {
	#[error(transparent)]
	Launch(#[from] LaunchError),

	#[error(transparent)]
	Terminate(#[from] TerminationError),
}

#[derive(Debug, Error)]
pub enum SupervisorError {
	#[error(transparent)]
	Keepalive(#[from] KeepaliveError),

	#[error("keepalive task failed: {0}")]
	Task(#[from] tokio::task::JoinError),
}
