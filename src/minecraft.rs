//! Minecraft services stage: XSTS service token to platform access token.

// crates.io
use serde_json::json;
// self
use crate::{
	_prelude::*,
	auth::{PlatformToken, ServiceToken, TokenSecret},
	exchange::{self, Authority, ExchangeStage, ExchangeStep},
	http::{ExchangeRequest, ExchangeResponse},
	json::JsonObjectView,
};

/// Login endpoint accepting an Xbox identity token.
pub const LOGIN_WITH_XBOX_URL: &str =
	"https://api.minecraftservices.com/authentication/login_with_xbox";
/// Body field carrying the service's error classification.
pub const ERROR_TYPE_FIELD: &str = "errorType";

/// Builds the login request for `service_token`.
pub fn login_request(service_token: &ServiceToken) -> Result<ExchangeRequest> {
	let url = exchange::endpoint(LOGIN_WITH_XBOX_URL)?;

	Ok(ExchangeRequest::post_json(url, json!({ "identityToken": service_token.identity_token() })))
}

/// Service token to platform token.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlatformTokenExchange;
impl ExchangeStep for PlatformTokenExchange {
	type Input = ServiceToken;
	type Output = PlatformToken;

	const STAGE: ExchangeStage = ExchangeStage::PlatformToken;

	fn request(input: &ServiceToken) -> Result<ExchangeRequest> {
		login_request(input)
	}

	fn reject(response: &ExchangeResponse) -> Error {
		// Error bodies are best effort; anything unreadable leaves the type unknown.
		let error_type = response
			.json_object()
			.ok()
			.and_then(|body| body.get_string(ERROR_TYPE_FIELD).map(str::to_owned));

		Error::Minecraft { error_type }
	}

	fn extract(body: &dyn JsonObjectView) -> Result<PlatformToken> {
		let missing = |field| exchange::missing(Authority::Minecraft, field);
		let value = body.get_string("access_token").ok_or_else(|| missing("access_token"))?;
		let owner_id = body.get_string("username").ok_or_else(|| missing("username"))?;
		let ttl_seconds = body
			.get_number("expires_in")
			.and_then(whole_seconds)
			.ok_or_else(|| missing("expires_in"))?;
		let scheme = body
			.get_string("type")
			.or_else(|| body.get_string("token_type"))
			.unwrap_or(PlatformToken::DEFAULT_SCHEME);

		Ok(PlatformToken {
			scheme: scheme.into(),
			value: TokenSecret::new(value),
			owner_id: owner_id.into(),
			ttl_seconds,
		})
	}
}

/// Drops any fractional part; negative or oversized lifetimes are rejected.
fn whole_seconds(ttl: f64) -> Option<u32> {
	let ttl = ttl.trunc();

	(0.0..=f64::from(u32::MAX)).contains(&ttl).then_some(ttl as u32)
}
