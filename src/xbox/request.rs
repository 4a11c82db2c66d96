//! Request builders for the Xbox Live user and XSTS endpoints.

// crates.io
use serde_json::{Value, json};
// self
use crate::{
	_prelude::*,
	auth::{IdentityCredential, UserToken},
	exchange,
	http::ExchangeRequest,
};

/// User token endpoint.
pub const USER_AUTHENTICATE_URL: &str = "https://user.auth.xboxlive.com/user/authenticate";
/// XSTS authorization endpoint.
pub const XSTS_AUTHORIZE_URL: &str = "https://xsts.auth.xboxlive.com/xsts/authorize";
/// Relying party of the user token.
pub const XBOX_RELYING_PARTY: &str = "http://auth.xboxlive.com";
/// Relying party of the service token; scopes it to Minecraft services.
pub const MINECRAFT_RELYING_PARTY: &str = "rp://api.minecraftservices.com/";
/// Site name presented with the RPS ticket.
pub const USER_SITE_NAME: &str = "user.auth.xboxlive.com";
/// Sandbox requested for the service token.
pub const RETAIL_SANDBOX: &str = "RETAIL";

/// Builds the user token request for `credential`.
pub fn user_token_request(credential: &IdentityCredential) -> Result<ExchangeRequest> {
	token_request(
		USER_AUTHENTICATE_URL,
		XBOX_RELYING_PARTY,
		json!({
			"AuthMethod": "RPS",
			"SiteName": USER_SITE_NAME,
			"RpsTicket": credential.rps_ticket(),
		}),
	)
}

/// Builds the XSTS request that authorizes `user_token` for Minecraft services.
pub fn service_token_request(user_token: &UserToken) -> Result<ExchangeRequest> {
	token_request(
		XSTS_AUTHORIZE_URL,
		MINECRAFT_RELYING_PARTY,
		json!({
			"SandboxId": RETAIL_SANDBOX,
			"UserTokens": [user_token.value.expose()],
		}),
	)
}

fn token_request(
	url: &'static str,
	relying_party: &str,
	properties: Value,
) -> Result<ExchangeRequest> {
	let body = json!({
		"TokenType": "JWT",
		"Properties": properties,
		"RelyingParty": relying_party,
	});

	Ok(ExchangeRequest::post_json(exchange::endpoint(url)?, body))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::http::{Method, header};

	#[test]
	fn user_request_carries_rps_ticket() {
		let request = user_token_request(&IdentityCredential::new("ms-token"))
			.expect("User request should build.");
		let body = request.json_body.expect("User request should have a body.");

		assert_eq!(request.method, Method::POST);
		assert_eq!(request.url.as_str(), USER_AUTHENTICATE_URL);
		assert_eq!(
			body,
			json!({
				"TokenType": "JWT",
				"Properties": {
					"AuthMethod": "RPS",
					"SiteName": "user.auth.xboxlive.com",
					"RpsTicket": "d=ms-token",
				},
				"RelyingParty": "http://auth.xboxlive.com",
			})
		);
	}

	#[test]
	fn service_request_targets_minecraft_relying_party() {
		let request = service_token_request(&UserToken::new("user-token", "uhs"))
			.expect("Service request should build.");
		let body = request.json_body.expect("Service request should have a body.");

		assert_eq!(request.url.as_str(), XSTS_AUTHORIZE_URL);
		assert_eq!(body["RelyingParty"], "rp://api.minecraftservices.com/");
		assert_eq!(body["Properties"]["SandboxId"], "RETAIL");
		assert_eq!(body["Properties"]["UserTokens"], json!(["user-token"]));
		assert_eq!(request.headers[header::ACCEPT], "application/json");
	}
}
