//! Xbox Live tokens: the user token and the XSTS service token.

// self
use crate::{_prelude::*, auth::TokenSecret};

macro_rules! def_xbox_token {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		///
		/// `subject` is the opaque user hash (`uhs`) Xbox Live returns with the token. It is
		/// not the XUID or gamertag.
		#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
		pub struct $name {
			/// Token value presented to the next authority.
			pub value: TokenSecret,
			/// User hash of the token owner.
			pub subject: String,
		}
		impl $name {
			/// Creates a token, e.g. when restoring one the caller cached earlier.
			pub fn new(value: impl Into<String>, subject: impl Into<String>) -> Self {
				Self { value: TokenSecret::new(value), subject: subject.into() }
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!(stringify!($name), "(uhs={})"), self.subject)
			}
		}
	};
}

def_xbox_token!(UserToken, "Xbox Live user token obtained from the identity credential.");
def_xbox_token!(ServiceToken, "XSTS token authorizing access to Minecraft services.");

impl ServiceToken {
	/// Builds the `XBL3.0 x=<uhs>;<token>` identity token Minecraft services accept.
	pub fn identity_token(&self) -> String {
		format!("XBL3.0 x={};{}", self.subject, self.value.expose())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identity_token_joins_subject_and_value() {
		let token = ServiceToken::new("xsts-value", "2535405290");

		assert_eq!(token.identity_token(), "XBL3.0 x=2535405290;xsts-value");
	}

	#[test]
	fn formatting_shows_subject_only() {
		let token = UserToken::new("user-value", "2535405290");

		assert_eq!(token.to_string(), "UserToken(uhs=2535405290)");
		assert!(!format!("{token:?}").contains("user-value"));
	}
}
