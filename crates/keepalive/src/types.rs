use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Wait applied between an observed exit and the next launch when the
/// config leaves `retrySec` unset or zero.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);

pub const DEFAULT_SHELL: &str = "/bin/sh";

/// One supervised command, fully resolved and immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
	pub name: String,
	pub cmd: String,
	pub shell: String,
	pub startup_delay: Duration,
	/// Always positive. See [`resolve_retry_delay`].
	pub retry_delay: Duration,
	pub show_log: bool,
	pub env: HashMap<String, String>,
	pub dir: Option<PathBuf>,
}

impl CommandSpec {
	pub fn new(name: impl Into<String>, cmd: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			cmd: cmd.into(),
			shell: DEFAULT_SHELL.to_string(),
			startup_delay: Duration::ZERO,
			retry_delay: DEFAULT_RETRY_DELAY,
			show_log: false,
			env: HashMap::new(),
			dir: None,
		}
	}
}

/// Zero means "use the default", never a literal zero wait.
pub fn resolve_retry_delay(secs: Option<u64>) -> Duration {
	match secs {
		Some(secs) if secs > 0 => Duration::from_secs(secs),
		_ => DEFAULT_RETRY_DELAY,
	}
}
