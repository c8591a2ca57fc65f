use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::error::KeepaliveError;
use crate::launcher::launch;
use crate::types::{CommandSpec, DEFAULT_RETRY_DELAY};

/// Keeps `spec` running until `cancel` fires.
///
/// The child is relaunched after every exit, whatever the exit status, once
/// `spec.retry_delay` has passed, or [`DEFAULT_RETRY_DELAY`] when that is
/// zero. On cancellation the live child gets one SIGTERM and the loop
/// returns without waiting for it. Sleeps end early on
/// cancellation, in which case nothing is launched. Any launch failure, or a
/// SIGTERM that cannot be delivered, ends the loop with an error.
pub async fn run_keepalive(spec: &CommandSpec, cancel: CancellationToken) -> Result<(), KeepaliveError> {
	if cancel.is_cancelled() {
		return Ok(());
	}

	if !spec.startup_delay.is_zero() {
		tracing::info!(
			"{}: sleeping {}s before first launch",
			spec.name,
			spec.startup_delay.as_secs_f64()
		);
		if !sleep_unless_cancelled(spec.startup_delay, &cancel).await {
			tracing::info!("{}: cancelled before first launch", spec.name);
			return Ok(());
		}
	}

	let retry_delay = if spec.retry_delay.is_zero() {
		DEFAULT_RETRY_DELAY
	} else {
		spec.retry_delay
	};

	tracing::info!("{}: starting", spec.name);
	let mut handle = launch(spec)?;
	tracing::info!("{}: running (pid {})", spec.name, handle.pid());

	loop {
		tokio::select! {
			_ = cancel.cancelled() => {
				tracing::info!("{}: stopping pid {}", spec.name, handle.pid());
				handle.terminate()?;
				return Ok(());
			}
			status = handle.wait() => {
				match status {
					Ok(status) => tracing::info!(
						"{}: pid {} {}, restarting in {}s",
						spec.name,
						handle.pid(),
						describe_exit(status),
						retry_delay.as_secs_f64()
					),
					Err(e) => tracing::warn!(
						"{}: lost track of pid {} ({}), restarting in {}s",
						spec.name,
						handle.pid(),
						e,
						retry_delay.as_secs_f64()
					),
				}
			}
		}

		if !sleep_unless_cancelled(retry_delay, &cancel).await {
			tracing::info!("{}: cancelled while waiting to restart", spec.name);
			return Ok(());
		}

		handle = launch(spec)?;
		tracing::info!("{}: restarted (pid {})", spec.name, handle.pid());
	}
}

/// Returns false if `cancel` fired before `delay` elapsed.
async fn sleep_unless_cancelled(delay: Duration, cancel: &CancellationToken) -> bool {
	tokio::select! {
		_ = tokio::time::sleep(delay) => true,
		_ = cancel.cancelled() => false,
	}
}

fn describe_exit(status: ExitStatus) -> String {
	match (status.code(), status.signal()) {
		(Some(0), _) => "exited cleanly".to_string(),
		(Some(code), _) => format!("exited with code {}", code),
		(None, Some(signal)) => format!("killed by signal {}", signal),
		(None, None) => "exited".to_string(),
	}
}
