// self
use crate::{_prelude::*, error::TransportError, exchange::ExchangeStage};

/// A span wrapping one stage or one orchestrated login.
#[derive(Clone, Debug)]
pub struct ExchangeSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl ExchangeSpan {
	/// Creates a span for a single exchange stage.
	pub fn stage(stage: ExchangeStage) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("xbl_token_chain.exchange", stage = stage.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self {}
		}
	}

	/// Creates a span for a full login started at `entry`.
	pub fn chain(entry: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("xbl_token_chain.chain", entry);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = entry;

			Self {}
		}
	}

	/// Enters the span until the returned guard drops.
	pub fn entered(self) -> ExchangeSpanGuard {
		#[cfg(feature = "tracing")]
		{
			ExchangeSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			ExchangeSpanGuard {}
		}
	}
}

/// RAII guard returned by [`ExchangeSpan::entered`].
pub struct ExchangeSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for ExchangeSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ExchangeSpanGuard(..)")
	}
}

/// Logs an authority rejecting a stage.
pub fn trace_rejection(stage: ExchangeStage, status: u16, error: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(stage = stage.as_str(), status, %error, "Exchange rejected.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (stage, status, error);
	}
}

/// Logs a transport failure during a stage.
pub fn trace_transport_failure(stage: ExchangeStage, error: &TransportError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(stage = stage.as_str(), %error, "Exchange transport failed.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (stage, error);
	}
}
