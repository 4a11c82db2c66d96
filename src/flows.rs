//! Chain orchestrator powered by a shared transport.

mod login;
mod stages;

pub use login::*;

// self
use crate::{_prelude::*, http::ExchangeTransport};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Chain specialized for the crate's default reqwest transport.
pub type ReqwestAuthChain = AuthChain<ReqwestTransport>;

/// Runs the Identity → UserToken → ServiceToken → PlatformToken chain.
///
/// The chain holds nothing but the transport, so one instance (or its clones) can serve any
/// number of concurrent logins. Every stage sends exactly one request; nothing is retried
/// and nothing is cached.
pub struct AuthChain<T>
where
	T: ?Sized + ExchangeTransport,
{
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
}
impl<T> AuthChain<T>
where
	T: ?Sized + ExchangeTransport,
{
	/// Creates a chain that sends through the caller-provided transport.
	pub fn with_transport(transport: impl Into<Arc<T>>) -> Self {
		Self { transport: transport.into() }
	}
}
#[cfg(feature = "reqwest")]
impl AuthChain<ReqwestTransport> {
	/// Creates a chain backed by a [`ReqwestTransport`] with default settings.
	pub fn new() -> Result<Self> {
		Ok(Self::with_transport(ReqwestTransport::new()?))
	}
}
impl<T> Clone for AuthChain<T>
where
	T: ?Sized + ExchangeTransport,
{
	fn clone(&self) -> Self {
		Self { transport: self.transport.clone() }
	}
}
impl<T> Debug for AuthChain<T>
where
	T: ?Sized + ExchangeTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthChain").field("transport", &std::any::type_name::<T>()).finish()
	}
}
