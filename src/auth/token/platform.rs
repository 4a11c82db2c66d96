//! Minecraft access token, the end product of the chain.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access token issued by Minecraft services.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformToken {
	/// Authorization scheme, `Bearer` unless the service names another.
	pub scheme: String,
	/// Access token value.
	pub value: TokenSecret,
	/// Identifier of the owning account as reported by the service.
	pub owner_id: String,
	/// Lifetime in seconds, counted from issuance.
	pub ttl_seconds: u32,
}
impl PlatformToken {
	/// Scheme used when the service does not report one.
	pub const DEFAULT_SCHEME: &'static str = "Bearer";

	/// Renders the `Authorization` header value, e.g. `Bearer eyJ...`.
	pub fn authorization_header(&self) -> String {
		format!("{} {}", self.scheme, self.value.expose())
	}

	/// Token lifetime as a [`Duration`].
	pub fn lifetime(&self) -> Duration {
		Duration::seconds(i64::from(self.ttl_seconds))
	}

	/// Expiry instant for a token issued at `issued_at`.
	///
	/// The service reports a relative lifetime only; callers record the issue time.
	pub fn expires_at(&self, issued_at: OffsetDateTime) -> OffsetDateTime {
		issued_at + self.lifetime()
	}
}
