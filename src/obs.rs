//! Optional observability helpers for the exchange chain.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `xbl_token_chain.exchange` (one per stage, with a
//!   `stage` field) and `xbl_token_chain.chain` (one per orchestrated login, with an `entry`
//!   field). Rejections are logged at `debug`, transport failures at `warn`.
//! - Enable `metrics` to increment the `xbl_token_chain_exchange_total` counter for every
//!   attempt/success/failure, labeled by `stage` + `outcome`.
//!
//! Token values never reach either backend.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each stage attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageOutcome {
	/// A stage started.
	Attempt,
	/// The stage produced its token.
	Success,
	/// The stage failed and the error propagated to the caller.
	Failure,
}
impl StageOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StageOutcome::Attempt => "attempt",
			StageOutcome::Success => "success",
			StageOutcome::Failure => "failure",
		}
	}
}
impl Display for StageOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
