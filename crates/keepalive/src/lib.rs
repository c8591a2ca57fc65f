//! # keepalive
//!
//! Minimal process supervisor.
//!
//! Launches each configured shell command as a child process, relaunches it
//! whenever it exits, and sends every live child a SIGTERM when the operator
//! interrupts the supervisor. One failing launch stops supervision of all
//! commands.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use keepalive::{CommandSpec, Supervisor};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut web = CommandSpec::new("web", "python -m http.server");
//! web.retry_delay = Duration::from_secs(2);
//! web.show_log = true;
//!
//! let sup = Supervisor::new(vec![web]);
//! sup.cancel_on_interrupt().unwrap();
//! sup.run().await.unwrap();
//! # }
//! ```

pub mod config;
pub mod error;
pub mod keepalive;
pub mod launcher;
pub mod output;
pub mod supervisor;
pub mod types;

pub use error::{ConfigError, KeepaliveError, LaunchError, SupervisorError, TerminationError};
pub use keepalive::run_keepalive;
pub use launcher::{launch, ProcessHandle};
pub use supervisor::Supervisor;
pub use types::*;
