//! Runs the full chain against the live services with the default reqwest transport.
//!
//! Obtain a Microsoft account access token for the Xbox Live scope first (any OAuth client
//! will do), then:
//!
//! ```sh
//! MS_ACCESS_TOKEN=EwB4A8l6... cargo run --example login
//! ```

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
use time::OffsetDateTime;
// self
use xbl_token_chain::{auth::IdentityCredential, flows::AuthChain};

fn main() -> Result<()> {
	color_eyre::install()?;

	let token = env::var("MS_ACCESS_TOKEN")
		.map_err(|_| eyre!("Set MS_ACCESS_TOKEN to a Microsoft account access token."))?;
	let chain = AuthChain::new()?;
	let issued_at = OffsetDateTime::now_utc();

	match chain.login_with_identity(&IdentityCredential::new(token)) {
		Ok(token) => {
			println!("Minecraft account: {}.", token.owner_id);
			println!("Token expires at {}.", token.expires_at(issued_at));
		},
		Err(e) => {
			if let Some(reason) = e.xbox_reason().filter(|reason| reason.is_user_actionable()) {
				println!("The account holder has to act before retrying: {reason}.");
			}

			return Err(e.into());
		},
	}

	Ok(())
}
