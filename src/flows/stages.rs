//! Single-stage entry points for callers that drive the chain themselves.

// self
use crate::{
	_prelude::*,
	auth::{IdentityCredential, PlatformToken, ServiceToken, UserToken},
	exchange,
	flows::AuthChain,
	http::ExchangeTransport,
	minecraft::PlatformTokenExchange,
	xbox::{ServiceTokenExchange, UserTokenExchange},
};

impl<T> AuthChain<T>
where
	T: ?Sized + ExchangeTransport,
{
	/// Exchanges the Microsoft credential for an Xbox Live user token.
	///
	/// Errors are returned without stage context.
	pub fn user_token(&self, credential: &IdentityCredential) -> Result<UserToken> {
		exchange::execute::<UserTokenExchange, T>(&self.transport, credential)
	}

	/// Exchanges a user token for an XSTS token scoped to Minecraft services.
	///
	/// Errors are returned without stage context.
	pub fn service_token(&self, user_token: &UserToken) -> Result<ServiceToken> {
		exchange::execute::<ServiceTokenExchange, T>(&self.transport, user_token)
	}

	/// Exchanges an XSTS token for a Minecraft access token.
	///
	/// Errors are returned without stage context.
	pub fn platform_token(&self, service_token: &ServiceToken) -> Result<PlatformToken> {
		exchange::execute::<PlatformTokenExchange, T>(&self.transport, service_token)
	}
}
