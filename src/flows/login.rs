//! Full and partial logins driven as a small state machine.

// self
use crate::{
	_prelude::*,
	auth::{IdentityCredential, PlatformToken, ServiceToken, UserToken},
	exchange::ExchangeStage,
	flows::AuthChain,
	http::ExchangeTransport,
	obs::ExchangeSpan,
};

/// Progress of one login. Each state holds what the next stage consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainState<'a> {
	/// Nothing exchanged yet.
	Start(&'a IdentityCredential),
	/// Xbox Live user token obtained.
	HaveUserToken(UserToken),
	/// XSTS service token obtained.
	HaveServiceToken(ServiceToken),
	/// Platform token obtained; the login is complete.
	HavePlatformToken(PlatformToken),
}
impl ChainState<'_> {
	/// Stage that runs next, or `None` once the platform token is held.
	pub fn next_stage(&self) -> Option<ExchangeStage> {
		match self {
			ChainState::Start(_) => Some(ExchangeStage::UserToken),
			ChainState::HaveUserToken(_) => Some(ExchangeStage::ServiceToken),
			ChainState::HaveServiceToken(_) => Some(ExchangeStage::PlatformToken),
			ChainState::HavePlatformToken(_) => None,
		}
	}

	/// Returns `true` once the platform token is held.
	pub fn is_complete(&self) -> bool {
		self.next_stage().is_none()
	}
}

impl<T> AuthChain<T>
where
	T: ?Sized + ExchangeTransport,
{
	/// Runs all three stages starting from a Microsoft credential.
	///
	/// Stops at the first failure, wrapped as [`Error::Stage`] naming the stage; later
	/// stages are not attempted.
	pub fn login_with_identity(&self, credential: &IdentityCredential) -> Result<PlatformToken> {
		let _guard = ExchangeSpan::chain("identity").entered();

		self.drive(ChainState::Start(credential))
	}

	/// Runs only the platform stage, for callers holding a cached XSTS token.
	///
	/// Failures are wrapped as [`Error::Stage`] for [`ExchangeStage::PlatformToken`].
	pub fn login_with_service_token(&self, service_token: &ServiceToken) -> Result<PlatformToken> {
		let _guard = ExchangeSpan::chain("service_token").entered();

		self.drive(ChainState::HaveServiceToken(service_token.clone()))
	}

	/// Performs the stage `state` is waiting on and returns the following state.
	///
	/// A complete state is returned unchanged.
	pub fn advance<'a>(&self, state: ChainState<'a>) -> Result<ChainState<'a>> {
		let Some(stage) = state.next_stage() else {
			return Ok(state);
		};
		let next = match state {
			ChainState::Start(credential) =>
				self.user_token(credential).map(ChainState::HaveUserToken),
			ChainState::HaveUserToken(user_token) =>
				self.service_token(&user_token).map(ChainState::HaveServiceToken),
			ChainState::HaveServiceToken(service_token) =>
				self.platform_token(&service_token).map(ChainState::HavePlatformToken),
			complete @ ChainState::HavePlatformToken(_) => Ok(complete),
		};

		next.map_err(|e| e.in_stage(stage))
	}

	fn drive(&self, mut state: ChainState<'_>) -> Result<PlatformToken> {
		loop {
			state = match state {
				ChainState::HavePlatformToken(token) => return Ok(token),
				pending => self.advance(pending)?,
			};
		}
	}
}
