use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::types::{resolve_retry_delay, CommandSpec, DEFAULT_SHELL};

pub const DEFAULT_CONFIG_PATH: &str = "commands.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
	#[serde(default = "default_shell")]
	pub shell: String,
	#[serde(default)]
	pub commands: Vec<CommandEntry>,
}

/// A command as written in the config file, before defaults are applied.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandEntry {
	pub name: String,
	pub cmd: String,
	#[serde(default)]
	pub sleep: u64,
	#[serde(default)]
	pub show_log: bool,
	pub retry_sec: Option<u64>,
	#[serde(default)]
	pub env: HashMap<String, String>,
	pub dir: Option<PathBuf>,
}

fn default_shell() -> String {
	DEFAULT_SHELL.to_string()
}

/// Reads `path` and returns the validated command list in file order.
///
/// A `.toml` extension (any case) selects TOML; anything else is parsed as YAML.
pub fn load_config(path: &Path) -> Result<Vec<CommandSpec>, ConfigError> {
	let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
		path: path.to_path_buf(),
		source,
	})?;

	let is_toml = path
		.extension()
		.and_then(|e| e.to_str())
		.is_some_and(|e| e.eq_ignore_ascii_case("toml"));

	let file = if is_toml {
		toml::from_str::<ConfigFile>(&content).map_err(|source| ConfigError::Toml {
			path: path.to_path_buf(),
			source,
		})?
	} else {
		parse_yaml(&content).map_err(|source| ConfigError::Yaml {
			path: path.to_path_buf(),
			source,
		})?
	};

	if file.commands.is_empty() {
		return Err(ConfigError::NoCommands {
			path: path.to_path_buf(),
		});
	}

	resolve_commands(file)
}

pub fn parse_yaml(content: &str) -> Result<ConfigFile, serde_yaml::Error> {
	serde_yaml::from_str(content)
}

/// Validates entries and applies defaults.
pub fn resolve_commands(file: ConfigFile) -> Result<Vec<CommandSpec>, ConfigError> {
	let mut seen = HashSet::new();
	let mut commands = Vec::with_capacity(file.commands.len());

	for (index, entry) in file.commands.into_iter().enumerate() {
		let name = entry.name.trim().to_string();
		if name.is_empty() {
			return Err(ConfigError::EmptyName { index });
		}
		if entry.cmd.trim().is_empty() {
			return Err(ConfigError::EmptyCommand { name });
		}
		if !seen.insert(name.clone()) {
			return Err(ConfigError::DuplicateName { name });
		}

		commands.push(CommandSpec {
			name,
			cmd: entry.cmd,
			shell: file.shell.clone(),
			startup_delay: Duration::from_secs(entry.sleep),
			retry_delay: resolve_retry_delay(entry.retry_sec),
			show_log: entry.show_log,
			env: entry.env,
			dir: entry.dir,
		});
	}

	Ok(commands)
}
