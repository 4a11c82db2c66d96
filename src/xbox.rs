//! Xbox Live stages: identity credential to user token, user token to XSTS service token.
//!
//! Both endpoints answer with the same envelope:
//!
//! ```json
//! { "Token": "...", "DisplayClaims": { "xui": [{ "uhs": "..." }] } }
//! ```
//!
//! and reject with the same `XErr` scheme, classified by [`ErrorReason::classify`].

mod reason;
mod request;

pub use reason::*;
pub use request::*;

// self
use crate::{
	_prelude::*,
	auth::{IdentityCredential, ServiceToken, UserToken},
	exchange::{self, Authority, ExchangeStage, ExchangeStep},
	http::{ExchangeRequest, ExchangeResponse},
	json::{JsonObjectView, JsonValue},
};

/// Claim holding the user hash.
pub const USER_HASH_CLAIM: &str = "uhs";

/// Identity credential to user token.
#[derive(Clone, Copy, Debug, Default)]
pub struct UserTokenExchange;
impl ExchangeStep for UserTokenExchange {
	type Input = IdentityCredential;
	type Output = UserToken;

	const STAGE: ExchangeStage = ExchangeStage::UserToken;

	fn request(input: &IdentityCredential) -> Result<ExchangeRequest> {
		user_token_request(input)
	}

	fn reject(response: &ExchangeResponse) -> Error {
		rejection(response)
	}

	fn extract(body: &dyn JsonObjectView) -> Result<UserToken> {
		let (value, subject) = read_token(body)?;

		Ok(UserToken::new(value, subject))
	}
}

/// User token to XSTS service token for Minecraft services.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServiceTokenExchange;
impl ExchangeStep for ServiceTokenExchange {
	type Input = UserToken;
	type Output = ServiceToken;

	const STAGE: ExchangeStage = ExchangeStage::ServiceToken;

	fn request(input: &UserToken) -> Result<ExchangeRequest> {
		service_token_request(input)
	}

	fn reject(response: &ExchangeResponse) -> Error {
		rejection(response)
	}

	fn extract(body: &dyn JsonObjectView) -> Result<ServiceToken> {
		let (value, subject) = read_token(body)?;

		Ok(ServiceToken::new(value, subject))
	}
}

/// Returns the first `DisplayClaims.xui` entry carrying `claim` as a string.
///
/// Entries that are not objects, or that lack the claim, are skipped.
pub fn find_display_claim<'a>(body: &'a dyn JsonObjectView, claim: &str) -> Option<&'a str> {
	body.get_object("DisplayClaims")?
		.get_array("xui")?
		.iter()
		.flatten()
		.filter_map(JsonValue::as_object)
		.find_map(|entry| entry.get_string(claim))
}

fn read_token(body: &dyn JsonObjectView) -> Result<(&str, &str)> {
	let value =
		body.get_string("Token").ok_or_else(|| exchange::missing(Authority::XboxLive, "Token"))?;
	let subject = find_display_claim(body, USER_HASH_CLAIM)
		.ok_or_else(|| exchange::missing(Authority::XboxLive, "DisplayClaims.xui[].uhs"))?;

	Ok((value, subject))
}

fn rejection(response: &ExchangeResponse) -> Error {
	Error::XboxLive { reason: ErrorReason::classify(response).unwrap_or(ErrorReason::Unknown) }
}
