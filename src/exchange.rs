//! Single-hop exchange machinery shared by every stage of the chain.
//!
//! A stage is an [`ExchangeStep`]: it knows how to build its request, how to turn a non-2xx
//! response into an [`Error`], and how to read its token out of a 2xx body. [`execute`]
//! runs one step against a transport and owns the parts every stage has in common: status
//! routing, JSON parsing, spans and counters.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	http::{ExchangeRequest, ExchangeResponse, ExchangeTransport},
	json::JsonObjectView,
	obs::{self, ExchangeSpan, StageOutcome},
};

/// Remote service answering a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Authority {
	/// Xbox Live user and XSTS endpoints.
	XboxLive,
	/// Minecraft services login endpoint.
	Minecraft,
}
impl Display for Authority {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(match self {
			Authority::XboxLive => "Xbox Live",
			Authority::Minecraft => "Minecraft services",
		})
	}
}

/// The three hops of the chain, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExchangeStage {
	/// Identity credential to user token.
	UserToken,
	/// User token to XSTS service token.
	ServiceToken,
	/// Service token to platform token.
	PlatformToken,
}
impl ExchangeStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExchangeStage::UserToken => "user_token",
			ExchangeStage::ServiceToken => "service_token",
			ExchangeStage::PlatformToken => "platform_token",
		}
	}

	/// Human-readable description used in stage-wrapped errors.
	pub const fn context(self) -> &'static str {
		match self {
			ExchangeStage::UserToken => "fetching user token",
			ExchangeStage::ServiceToken => "fetching service token",
			ExchangeStage::PlatformToken => "exchanging for platform token",
		}
	}

	/// Authority that answers this stage.
	pub const fn authority(self) -> Authority {
		match self {
			ExchangeStage::UserToken | ExchangeStage::ServiceToken => Authority::XboxLive,
			ExchangeStage::PlatformToken => Authority::Minecraft,
		}
	}
}
impl Display for ExchangeStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.context())
	}
}

/// One hop of the chain.
pub trait ExchangeStep {
	/// Token or credential consumed by the hop.
	type Input: ?Sized;
	/// Token produced by the hop.
	type Output;

	/// Stage label used for errors, spans and counters.
	const STAGE: ExchangeStage;

	/// Builds the outbound request for `input`.
	fn request(input: &Self::Input) -> Result<ExchangeRequest>;

	/// Maps a non-2xx response to the authority's rejection error.
	fn reject(response: &ExchangeResponse) -> Error;

	/// Reads the produced token out of a 2xx body.
	fn extract(body: &dyn JsonObjectView) -> Result<Self::Output>;
}

/// Runs `S` once against `transport`.
///
/// Exactly one request is sent. The error is returned unwrapped; the orchestrator adds the
/// stage context.
pub fn execute<S, T>(transport: &T, input: &S::Input) -> Result<S::Output>
where
	S: ExchangeStep,
	T: ?Sized + ExchangeTransport,
{
	let _guard = ExchangeSpan::stage(S::STAGE).entered();

	obs::record_stage_outcome(S::STAGE, StageOutcome::Attempt);

	let result = run::<S, T>(transport, input);
	let outcome = if result.is_ok() { StageOutcome::Success } else { StageOutcome::Failure };

	obs::record_stage_outcome(S::STAGE, outcome);

	result
}

fn run<S, T>(transport: &T, input: &S::Input) -> Result<S::Output>
where
	S: ExchangeStep,
	T: ?Sized + ExchangeTransport,
{
	let request = S::request(input)?;
	let response = transport.send(&request).map_err(|e| {
		obs::trace_transport_failure(S::STAGE, &e);

		Error::from(e)
	})?;

	if !response.is_success() {
		let e = S::reject(&response);

		obs::trace_rejection(S::STAGE, response.status.as_u16(), &e);

		return Err(e);
	}

	let body = response
		.json_object()
		.map_err(|source| Error::MalformedResponse { authority: S::STAGE.authority(), source })?;

	S::extract(&*body)
}

/// Parses one of the fixed endpoint URLs.
pub(crate) fn endpoint(url: &'static str) -> Result<Url> {
	Url::parse(url).map_err(|source| ConfigError::InvalidEndpoint { url, source }.into())
}

/// Shorthand for the error raised when a required field is missing or mistyped.
pub(crate) fn missing(authority: Authority, field: &'static str) -> Error {
	Error::IncompleteResponse { authority, field }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{error::TransportError, http::StatusCode};

	struct Fixed(Result<ExchangeResponse, fn() -> TransportError>);
	impl ExchangeTransport for Fixed {
		fn send(&self, _: &ExchangeRequest) -> Result<ExchangeResponse, TransportError> {
			self.0.clone().map_err(|make| make())
		}
	}

	struct Echo;
	impl ExchangeStep for Echo {
		type Input = str;
		type Output = String;

		const STAGE: ExchangeStage = ExchangeStage::ServiceToken;

		fn request(input: &str) -> Result<ExchangeRequest> {
			Ok(ExchangeRequest::post_json(
				endpoint("https://example.invalid/echo")?,
				serde_json::json!({ "input": input }),
			))
		}

		fn reject(response: &ExchangeResponse) -> Error {
			Error::Minecraft { error_type: Some(response.status.as_u16().to_string()) }
		}

		fn extract(body: &dyn JsonObjectView) -> Result<String> {
			body.get_string("echo")
				.map(str::to_owned)
				.ok_or_else(|| missing(Authority::XboxLive, "echo"))
		}
	}

	fn refused() -> TransportError {
		std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused").into()
	}

	#[test]
	fn stage_labels_read_as_contexts() {
		assert_eq!(ExchangeStage::UserToken.to_string(), "fetching user token");
		assert_eq!(ExchangeStage::ServiceToken.to_string(), "fetching service token");
		assert_eq!(ExchangeStage::PlatformToken.to_string(), "exchanging for platform token");
		assert_eq!(ExchangeStage::PlatformToken.authority(), Authority::Minecraft);
	}

	#[test]
	fn success_extracts_output() {
		let transport = Fixed(Ok(ExchangeResponse::new(StatusCode::OK).with_body(r#"{"echo":"hi"}"#)));
		let output = execute::<Echo, _>(&transport, "hi").expect("Echo should succeed.");

		assert_eq!(output, "hi");
	}

	#[test]
	fn non_success_routes_to_reject() {
		let transport = Fixed(Ok(ExchangeResponse::new(StatusCode::SERVICE_UNAVAILABLE).with_body(r#"{"echo":"hi"}"#)));
		let err = execute::<Echo, _>(&transport, "hi").expect_err("503 should be rejected.");

		assert!(matches!(err, Error::Minecraft { error_type: Some(ref t) } if t == "503"));
	}

	#[test]
	fn unparseable_body_is_malformed() {
		let transport = Fixed(Ok(ExchangeResponse::new(StatusCode::OK).with_body("<html>")));
		let err = execute::<Echo, _>(&transport, "hi").expect_err("HTML should not parse.");

		assert!(matches!(err, Error::MalformedResponse { authority: Authority::XboxLive, .. }));
	}

	#[test]
	fn blank_body_is_incomplete() {
		let transport = Fixed(Ok(ExchangeResponse::new(StatusCode::NO_CONTENT)));
		let err = execute::<Echo, _>(&transport, "hi").expect_err("Blank body has no token.");

		assert!(matches!(err, Error::IncompleteResponse { field: "echo", .. }));
	}

	#[test]
	fn transport_failures_pass_through() {
		let transport = Fixed(Err(refused));
		let err = execute::<Echo, _>(&transport, "hi").expect_err("Transport should fail.");

		assert!(err.is_transport());
		assert_eq!(err.failed_stage(), None);
	}
}
