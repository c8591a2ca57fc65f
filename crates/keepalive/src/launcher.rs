use std::process::{ExitStatus, Stdio};
use tokio::process::{Child, Command};

use crate::error::{LaunchError, TerminationError};
use crate::output::{self, Stream};
use crate::types::CommandSpec;

/// A live child process. Only the keepalive loop that launched it waits on
/// or signals it.
#[derive(Debug)]
pub struct ProcessHandle {
	name: String,
	pid: u32,
	child: Child,
}

impl ProcessHandle {
	pub fn pid(&self) -> u32 {
		self.pid
	}

	/// Resolves when the child exits, for any reason.
	pub async fn wait(&mut self) -> std::io::Result<ExitStatus> {
		self.child.wait().await
	}

	/// Sends one SIGTERM to the child's process group and returns without
	/// waiting for it to exit.
	pub fn terminate(&self) -> Result<(), TerminationError> {
		use nix::sys::signal::{killpg, Signal};
		use nix::unistd::Pid;

		killpg(Pid::from_raw(self.pid as i32), Signal::SIGTERM).map_err(|source| {
			TerminationError {
				name: self.name.clone(),
				pid: self.pid,
				source,
			}
		})
	}
}

/// Starts `spec.cmd` under `spec.shell -c` in a new process group.
pub fn launch(spec: &CommandSpec) -> Result<ProcessHandle, LaunchError> {
	let (stdout, stderr) = if spec.show_log {
		(Stdio::piped(), Stdio::piped())
	} else {
		(Stdio::null(), Stdio::null())
	};

	let mut cmd = Command::new(&spec.shell);
	cmd.args(["-c", &spec.cmd])
		.envs(&spec.env)
		.stdin(Stdio::null())
		.stdout(stdout)
		.stderr(stderr)
		.process_group(0);

	if let Some(dir) = &spec.dir {
		cmd.current_dir(dir);
	}

	let mut child = cmd.spawn().map_err(|source| LaunchError {
		name: spec.name.clone(),
		source,
	})?;

	// Only None once the child has been reaped, which cannot happen before
	// the first wait.
	let pid = child.id().ok_or_else(|| LaunchError {
		name: spec.name.clone(),
		source: std::io::Error::other("process exited before its pid was read"),
	})?;

	if let Some(out) = child.stdout.take() {
		output::forward(&spec.name, out, Stream::Stdout);
	}
	if let Some(err) = child.stderr.take() {
		output::forward(&spec.name, err, Stream::Stderr);
	}

	tracing::debug!("{}: launched pid {}", spec.name, pid);

	Ok(ProcessHandle {
		name: spec.name.clone(),
		pid,
		child,
	})
}
