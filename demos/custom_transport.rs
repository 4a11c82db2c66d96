//! Demonstrates plugging a caller-written transport into the chain.
//!
//! 1. Implement [`ExchangeTransport`]: one blocking `send` returning the peer's status,
//!    headers and body. Only connection-level problems are a [`TransportError`].
//! 2. Hand the transport to [`AuthChain::with_transport`].
//! 3. Inspect typed failures through [`Error::failed_stage`] and [`Error::xbox_reason`].
//!
//! The transport below answers from canned bodies, so the demo runs offline.

// std
use std::sync::atomic::{AtomicBool, Ordering};
// crates.io
use color_eyre::Result;
use serde_json::json;
// self
use xbl_token_chain::{
	auth::IdentityCredential,
	error::{Error, TransportError},
	flows::AuthChain,
	http::{
		ExchangeRequest, ExchangeResponse, ExchangeTransport, HeaderName, HeaderValue, StatusCode,
	},
	xbox::XERR_HEADER,
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let chain = AuthChain::with_transport(CannedTransport::default());
	let token = chain.login_with_identity(&IdentityCredential::new("demo-identity"))?;

	println!("Platform token for {} via the canned transport: {}.", token.owner_id, token.scheme);

	chain.transport.unlink_account();

	match chain.login_with_identity(&IdentityCredential::new("demo-identity")) {
		Ok(_) => println!("Canned transport unexpectedly succeeded."),
		Err(e) => report(&e),
	}

	Ok(())
}

fn report(e: &Error) {
	println!("Login failed: {e}");

	if let (Some(stage), Some(reason)) = (e.failed_stage(), e.xbox_reason()) {
		println!("Stage `{}` was rejected by Xbox Live with `{reason}`.", stage.as_str());
	}
}

#[derive(Debug, Default)]
struct CannedTransport {
	unlinked: AtomicBool,
}
impl CannedTransport {
	fn unlink_account(&self) {
		self.unlinked.store(true, Ordering::Relaxed);
	}

	fn xbox_token(token: &str) -> ExchangeResponse {
		let body = json!({ "Token": token, "DisplayClaims": { "xui": [{ "uhs": "2535405290" }] } });

		ExchangeResponse::new(StatusCode::OK).with_body(body.to_string())
	}
}
impl ExchangeTransport for CannedTransport {
	fn send(&self, request: &ExchangeRequest) -> Result<ExchangeResponse, TransportError> {
		let response = match request.url.host_str() {
			Some("user.auth.xboxlive.com") => Self::xbox_token("canned-user-token"),
			Some("xsts.auth.xboxlive.com") if self.unlinked.load(Ordering::Relaxed) =>
				ExchangeResponse::new(StatusCode::UNAUTHORIZED).with_header(
					HeaderName::from_static(XERR_HEADER),
					HeaderValue::from_static("2148916233"),
				),
			Some("xsts.auth.xboxlive.com") => Self::xbox_token("canned-xsts-token"),
			Some("api.minecraftservices.com") => {
				let body = json!({
					"username": "ef6a2f9e-1c4a-4b8b-9d6f-0b1c2d3e4f50",
					"access_token": "canned-access-token",
					"token_type": "Bearer",
					"expires_in": 86400,
				});

				ExchangeResponse::new(StatusCode::OK).with_body(body.to_string())
			},
			_ => ExchangeResponse::new(StatusCode::NOT_FOUND),
		};

		Ok(response)
	}
}
