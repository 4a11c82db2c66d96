//! Crate-level error types shared across the exchange steps and the orchestrator.
//!
//! Every failure surfaces as [`Error`]. The four pipeline categories are
//! [`Error::Transport`] (the service could not be reached), [`Error::MalformedResponse`]
//! (the body is not the JSON shape that was expected), [`Error::IncompleteResponse`] (the
//! body parsed but a promised field is missing or mistyped) and the platform rejections
//! [`Error::XboxLive`] / [`Error::Minecraft`]. The orchestrator wraps any of them in
//! [`Error::Stage`] so callers learn which hop of the chain failed.

// self
use crate::{
	_prelude::*,
	exchange::{Authority, ExchangeStage},
	json::JsonMappingError,
	xbox::ErrorReason,
};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical authentication failure exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem (endpoint URL or HTTP client construction).
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The authority could not be reached (DNS, TCP, TLS, timeout, broken status line).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The response body could not be mapped to the expected JSON shape.
	#[error("Malformed response from {authority}.")]
	MalformedResponse {
		/// Authority that produced the body.
		authority: Authority,
		/// Underlying mapping failure.
		#[source]
		source: JsonMappingError,
	},
	/// The response body parsed, but a required field was missing or had the wrong type.
	#[error("Incomplete response from {authority}: `{field}` is missing or invalid.")]
	IncompleteResponse {
		/// Authority that produced the body.
		authority: Authority,
		/// Path of the offending field.
		field: &'static str,
	},
	/// Xbox Live rejected the exchange; `reason` is the classified vendor error.
	#[error("Xbox Live returned an error: {reason}.")]
	XboxLive {
		/// Classified cause of the rejection.
		reason: ErrorReason,
	},
	/// Minecraft services rejected the exchange.
	///
	/// The service does not share the Xbox Live code space, so the raw `errorType` string
	/// is carried instead of an [`ErrorReason`].
	#[error("Minecraft services returned an error: {}.", .error_type.as_deref().unwrap_or("unknown"))]
	Minecraft {
		/// Value of the `errorType` body field, when readable.
		error_type: Option<String>,
	},

	/// A chained exchange failed; `source` holds the stage-local cause.
	#[error("Failed while {stage}.")]
	Stage {
		/// Stage of the chain that failed.
		stage: ExchangeStage,
		/// Original, typed cause.
		#[source]
		source: Box<Error>,
	},
}
impl Error {
	/// Wraps `self` with the stage that was running when it occurred.
	pub fn in_stage(self, stage: ExchangeStage) -> Self {
		Self::Stage { stage, source: Box::new(self) }
	}

	/// Returns the innermost error, skipping any stage wrappers.
	pub fn root(&self) -> &Error {
		let mut current = self;

		while let Self::Stage { source, .. } = current {
			current = &**source;
		}

		current
	}

	/// Returns the outermost stage that failed, if the error came from a chained exchange.
	pub fn failed_stage(&self) -> Option<ExchangeStage> {
		match self {
			Self::Stage { stage, .. } => Some(*stage),
			_ => None,
		}
	}

	/// Returns the classified Xbox Live reason when the chain was rejected by Xbox Live.
	pub fn xbox_reason(&self) -> Option<ErrorReason> {
		match self.root() {
			Self::XboxLive { reason } => Some(*reason),
			_ => None,
		}
	}

	/// Returns `true` when the root cause is a transport failure.
	pub fn is_transport(&self) -> bool {
		matches!(self.root(), Self::Transport(_))
	}
}

/// Configuration failures raised before any request leaves the process.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A fixed endpoint URL could not be parsed.
	#[error("Endpoint URL `{url}` is invalid.")]
	InvalidEndpoint {
		/// Offending URL text.
		url: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ConfigError {
	fn from(e: reqwest::Error) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO). A non-2xx status is never one of these.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request did not complete before the transport's deadline.
	#[error("Request timed out while calling the service.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
	fn from(e: reqwest::Error) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn stage_wrapping_preserves_typed_cause() {
		let err = Error::XboxLive { reason: ErrorReason::XboxNotLinked }
			.in_stage(ExchangeStage::UserToken);

		assert_eq!(err.failed_stage(), Some(ExchangeStage::UserToken));
		assert_eq!(err.xbox_reason(), Some(ErrorReason::XboxNotLinked));
		assert!(matches!(err.root(), Error::XboxLive { .. }));
		assert_eq!(err.to_string(), "Failed while fetching user token.");
		assert!(!err.is_transport());
	}

	#[test]
	fn minecraft_error_message_tolerates_missing_type() {
		let known = Error::Minecraft { error_type: Some("NOT_FOUND".into()) };
		let unknown = Error::Minecraft { error_type: None };

		assert_eq!(known.to_string(), "Minecraft services returned an error: NOT_FOUND.");
		assert_eq!(unknown.to_string(), "Minecraft services returned an error: unknown.");
	}

	#[test]
	fn transport_errors_are_detected_through_stages() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
		let err = Error::from(TransportError::from(io)).in_stage(ExchangeStage::ServiceToken);

		assert!(err.is_transport());
		assert_eq!(err.xbox_reason(), None);
	}
}
