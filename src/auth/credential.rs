//! Caller-supplied Microsoft identity credential.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Microsoft account access token (the "identity token") that starts the chain.
///
/// Obtaining it is the caller's business; the chain only presents it to Xbox Live as an RPS
/// ticket (`d=<token>`). Intentionally not serializable.
#[derive(Clone, PartialEq, Eq)]
pub struct IdentityCredential(TokenSecret);
impl IdentityCredential {
	/// Wraps a Microsoft access token.
	pub fn new(token: impl Into<String>) -> Self {
		Self(TokenSecret::new(token))
	}

	/// Returns the raw token. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		self.0.expose()
	}

	/// Formats the token as the RPS ticket Xbox Live expects.
	pub fn rps_ticket(&self) -> String {
		format!("d={}", self.expose())
	}
}
impl From<String> for IdentityCredential {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}
impl From<&str> for IdentityCredential {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl Debug for IdentityCredential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("IdentityCredential").field(&self.0).finish()
	}
}
