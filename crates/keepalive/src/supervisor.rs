use tokio::signal::unix::{signal, SignalKind};
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::error::SupervisorError;
use crate::keepalive::run_keepalive;
use crate::types::CommandSpec;

/// Runs one keepalive loop per command and stops them all together.
pub struct Supervisor {
	commands: Vec<CommandSpec>,
	cancel: CancellationToken,
}

impl Supervisor {
	pub fn new(commands: Vec<CommandSpec>) -> Self {
		Self {
			commands,
			cancel: CancellationToken::new(),
		}
	}

	/// Cancelling this token stops every loop, exactly like an interrupt.
	pub fn cancel_token(&self) -> CancellationToken {
		self.cancel.clone()
	}

	/// Cancels on the first SIGINT or SIGTERM. Later signals are swallowed so
	/// a second Ctrl-C cannot kill the supervisor mid-shutdown.
	///
	/// Handlers are registered before this returns, so no signal that arrives
	/// afterwards can take the default action.
	pub fn cancel_on_interrupt(&self) -> std::io::Result<JoinHandle<()>> {
		let mut interrupt = signal(SignalKind::interrupt())?;
		let mut terminate = signal(SignalKind::terminate())?;
		let cancel = self.cancel.clone();

		Ok(tokio::spawn(async move {
			loop {
				let name = tokio::select! {
					received = interrupt.recv() => received.map(|_| "SIGINT"),
					received = terminate.recv() => received.map(|_| "SIGTERM"),
				};
				let Some(name) = name else {
					return;
				};

				if cancel.is_cancelled() {
					tracing::debug!("{} ignored, already shutting down", name);
				} else {
					tracing::info!("{} received, stopping all commands", name);
					cancel.cancel();
				}
			}
		}))
	}

	/// Returns once every loop has stopped after cancellation.
	///
	/// The first loop that fails ends the whole run: the remaining loops are
	/// aborted without signalling their children and the error is returned.
	pub async fn run(self) -> Result<(), SupervisorError> {
		let mut tasks = JoinSet::new();

		for spec in self.commands {
			let cancel = self.cancel.clone();
			tasks.spawn(async move {
				let result = run_keepalive(&spec, cancel).await;
				(spec.name, result)
			});
		}

		tracing::info!("supervising {} command(s)", tasks.len());

		while let Some(joined) = tasks.join_next().await {
			match joined {
				Ok((name, Ok(()))) => tracing::info!("{}: stopped", name),
				Ok((name, Err(e))) => {
					tracing::error!("{}: {}", name, e);
					tasks.abort_all();
					return Err(e.into());
				}
				Err(e) => {
					tracing::error!("keepalive task failed: {}", e);
					tasks.abort_all();
					return Err(e.into());
				}
			}
		}

		Ok(())
	}
}
