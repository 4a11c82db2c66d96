//! Classification of Xbox Live rejections.
//!
//! Xbox Live explains most rejections with a numeric `XErr` code, sent either as a response
//! header or as a body field. Codes are HRESULT-style 32-bit values and may arrive as JSON
//! numbers, decimal strings, or `0x` hex strings. When no code is present the HTTP status
//! is the only hint: 400 and 401 point at the Microsoft credential.

// self
use crate::{_prelude::*, http::ExchangeResponse, json::JsonValue};

/// Body field carrying the vendor error code.
pub const XERR_FIELD: &str = "XErr";
/// Header carrying the vendor error code, in the lowercase form header maps store.
pub const XERR_HEADER: &str = "xerr";

const CODE_TABLE: &[(i64, ErrorReason)] = &[
	(0x8015_DC09, ErrorReason::XboxNotLinked),
	(0x8015_DC0B, ErrorReason::RegionNotAllowed),
	(0x8015_DC0C, ErrorReason::AgeNotVerified),
	(0x8015_DC0D, ErrorReason::AgeNotVerified),
	(0x8015_DC0E, ErrorReason::AgeTooYoung),
	(0x8015_DC12, ErrorReason::SandboxNotAllowed),
	(0x8015_DC1F, ErrorReason::ServiceTokenExpired),
	(0x8015_DC22, ErrorReason::UserTokenExpired),
	(0x8015_DC26, ErrorReason::UserTokenInvalid),
	(0x8015_DC27, ErrorReason::ServiceTokenInvalid),
	(0x8015_DC31, ErrorReason::Outage),
	(0x8015_DC32, ErrorReason::Outage),
];
const ALL: [ErrorReason; 13] = [
	ErrorReason::Unknown,
	ErrorReason::XboxNotLinked,
	ErrorReason::AgeTooYoung,
	ErrorReason::AgeNotVerified,
	ErrorReason::RegionNotAllowed,
	ErrorReason::Outage,
	ErrorReason::SandboxNotAllowed,
	ErrorReason::MicrosoftTokenInvalid,
	ErrorReason::MicrosoftTokenExpired,
	ErrorReason::UserTokenExpired,
	ErrorReason::UserTokenInvalid,
	ErrorReason::ServiceTokenExpired,
	ErrorReason::ServiceTokenInvalid,
];

/// Raised when parsing an [`ErrorReason`] from an unknown label.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown Xbox Live error reason `{label}`.")]
pub struct ReasonParseError {
	/// Rejected input.
	pub label: String,
}

/// Why Xbox Live refused an exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
	/// No known code, or a code this crate does not recognize.
	Unknown,
	/// The Microsoft account has no Xbox profile yet.
	XboxNotLinked,
	/// The account holder is a child and needs to be added to a family.
	AgeTooYoung,
	/// Adult verification is required (South Korea).
	AgeNotVerified,
	/// Xbox Live is unavailable in the account's country.
	RegionNotAllowed,
	/// Xbox Live is down or degraded.
	Outage,
	/// The requested sandbox is not allowed for this account.
	SandboxNotAllowed,
	/// The Microsoft credential was rejected (status 400 without a code).
	MicrosoftTokenInvalid,
	/// The Microsoft credential has expired (status 401 without a code).
	MicrosoftTokenExpired,
	/// The user token has expired.
	UserTokenExpired,
	/// The user token is not valid.
	UserTokenInvalid,
	/// The service token has expired.
	ServiceTokenExpired,
	/// The service token is not valid.
	ServiceTokenInvalid,
}
impl ErrorReason {
	/// Looks up a vendor code; unrecognized codes map to [`ErrorReason::Unknown`].
	pub fn from_code(code: i64) -> Self {
		CODE_TABLE
			.iter()
			.find(|(known, _)| *known == code)
			.map_or(Self::Unknown, |(_, reason)| *reason)
	}

	/// Vendor codes that map to this reason. Empty for the status-derived reasons.
	pub fn codes(self) -> impl Iterator<Item = i64> {
		CODE_TABLE.iter().filter(move |(_, reason)| *reason == self).map(|(code, _)| *code)
	}

	/// Classifies a rejected response.
	///
	/// Returns `None` for 2xx responses. Otherwise the `XErr` header wins over the body
	/// field; when the header repeats, its first value is used. A code that is present but unreadable reads as [`ErrorReason::Unknown`]; only
	/// a missing code falls back to the status.
	pub fn classify(response: &ExchangeResponse) -> Option<Self> {
		if response.is_success() {
			return None;
		}

		let reason = match vendor_code(response) {
			Some(code) => code.map_or(Self::Unknown, Self::from_code),
			None => match response.status.as_u16() {
				400 => Self::MicrosoftTokenInvalid,
				401 => Self::MicrosoftTokenExpired,
				_ => Self::Unknown,
			},
		};

		Some(reason)
	}

	/// Returns a stable snake_case label.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorReason::Unknown => "unknown",
			ErrorReason::XboxNotLinked => "xbox_not_linked",
			ErrorReason::AgeTooYoung => "age_too_young",
			ErrorReason::AgeNotVerified => "age_not_verified",
			ErrorReason::RegionNotAllowed => "region_not_allowed",
			ErrorReason::Outage => "outage",
			ErrorReason::SandboxNotAllowed => "sandbox_not_allowed",
			ErrorReason::MicrosoftTokenInvalid => "microsoft_token_invalid",
			ErrorReason::MicrosoftTokenExpired => "microsoft_token_expired",
			ErrorReason::UserTokenExpired => "user_token_expired",
			ErrorReason::UserTokenInvalid => "user_token_invalid",
			ErrorReason::ServiceTokenExpired => "service_token_expired",
			ErrorReason::ServiceTokenInvalid => "service_token_invalid",
		}
	}

	/// Whether the account holder must act (link, verify, grow up, move) before retrying.
	pub const fn is_user_actionable(self) -> bool {
		matches!(
			self,
			ErrorReason::XboxNotLinked
				| ErrorReason::AgeTooYoung
				| ErrorReason::AgeNotVerified
				| ErrorReason::RegionNotAllowed
		)
	}
}
impl Display for ErrorReason {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ErrorReason {
	type Err = ReasonParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ALL.into_iter()
			.find(|reason| reason.as_str() == s)
			.ok_or_else(|| ReasonParseError { label: s.to_owned() })
	}
}

/// `None` when no code was sent, `Some(None)` when one was sent but could not be read.
fn vendor_code(response: &ExchangeResponse) -> Option<Option<i64>> {
	if let Some(raw) = response.headers.get(XERR_HEADER) {
		return Some(raw.to_str().ok().and_then(|text| parse_code(JsonValue::String(text))));
	}

	// A rejection body that is not JSON simply carries no code.
	let body = response.json_object().ok()?;
	let value = body.get(XERR_FIELD)?;

	Some(parse_code(value))
}

fn parse_code(value: JsonValue<'_>) -> Option<i64> {
	if let JsonValue::String(text) = value {
		let text = text.trim();

		if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
			return i64::from_str_radix(hex, 16).ok();
		}
	}

	value.as_integer()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::http::{HeaderName, HeaderValue, StatusCode};

	fn rejected(status: u16) -> ExchangeResponse {
		ExchangeResponse::new(StatusCode::from_u16(status).expect("Fixture status should be valid."))
	}

	fn with_xerr(response: ExchangeResponse, value: HeaderValue) -> ExchangeResponse {
		response.with_header(HeaderName::from_static(XERR_HEADER), value)
	}

	#[test]
	fn known_codes_map_to_reasons() {
		assert_eq!(ErrorReason::from_code(2_148_916_233), ErrorReason::XboxNotLinked);
		assert_eq!(ErrorReason::from_code(2_148_916_238), ErrorReason::AgeTooYoung);
		assert_eq!(ErrorReason::from_code(0x8015_DC0C), ErrorReason::AgeNotVerified);
		assert_eq!(ErrorReason::from_code(0x8015_DC0D), ErrorReason::AgeNotVerified);
		assert_eq!(ErrorReason::from_code(0x8015_DC32), ErrorReason::Outage);
		assert_eq!(ErrorReason::from_code(42), ErrorReason::Unknown);
	}

	#[test]
	fn codes_are_listed_per_reason() {
		assert_eq!(ErrorReason::Outage.codes().collect::<Vec<_>>(), [0x8015_DC31, 0x8015_DC32]);
		assert_eq!(ErrorReason::MicrosoftTokenInvalid.codes().count(), 0);
	}

	#[test]
	fn header_code_wins_over_body() {
		let response = with_xerr(rejected(401), HeaderValue::from_static("2148916233"))
			.with_body(r#"{"XErr":2148916238}"#);

		assert_eq!(ErrorReason::classify(&response), Some(ErrorReason::XboxNotLinked));
	}

	#[test]
	fn repeated_header_uses_first_value() {
		let response = with_xerr(
			with_xerr(rejected(403), HeaderValue::from_static("2148916233")),
			HeaderValue::from_static("2148916238"),
		);

		assert_eq!(ErrorReason::classify(&response), Some(ErrorReason::XboxNotLinked));
	}

	#[test]
	fn body_code_accepts_numbers_and_strings() {
		let number = rejected(403).with_body(r#"{"XErr":2148916238,"Message":""}"#);
		let string = rejected(403).with_body(r#"{"XErr":"2148916235"}"#);
		let hex = rejected(403).with_body(r#"{"XErr":"0x8015DC12"}"#);

		assert_eq!(ErrorReason::classify(&number), Some(ErrorReason::AgeTooYoung));
		assert_eq!(ErrorReason::classify(&string), Some(ErrorReason::RegionNotAllowed));
		assert_eq!(ErrorReason::classify(&hex), Some(ErrorReason::SandboxNotAllowed));
	}

	#[test]
	fn missing_code_falls_back_to_status() {
		assert_eq!(ErrorReason::classify(&rejected(400)), Some(ErrorReason::MicrosoftTokenInvalid));
		assert_eq!(ErrorReason::classify(&rejected(401)), Some(ErrorReason::MicrosoftTokenExpired));
		assert_eq!(ErrorReason::classify(&rejected(403)), Some(ErrorReason::Unknown));
		assert_eq!(ErrorReason::classify(&rejected(500)), Some(ErrorReason::Unknown));

		let null_code = rejected(401).with_body(r#"{"XErr":null}"#);
		let html = rejected(400).with_body("<html>Bad Request</html>");

		assert_eq!(ErrorReason::classify(&null_code), Some(ErrorReason::MicrosoftTokenExpired));
		assert_eq!(ErrorReason::classify(&html), Some(ErrorReason::MicrosoftTokenInvalid));
	}

	#[test]
	fn unreadable_code_is_unknown() {
		let header = with_xerr(rejected(400), HeaderValue::from_static("not-a-number"));
		let opaque = HeaderValue::from_bytes(b"\xff\xfe").expect("Opaque bytes are a valid value.");
		let binary = with_xerr(rejected(401), opaque);
		let body = rejected(401).with_body(r#"{"XErr":true}"#);

		assert_eq!(ErrorReason::classify(&header), Some(ErrorReason::Unknown));
		assert_eq!(ErrorReason::classify(&binary), Some(ErrorReason::Unknown));
		assert_eq!(ErrorReason::classify(&body), Some(ErrorReason::Unknown));
	}

	#[test]
	fn success_is_not_classified() {
		let response = with_xerr(rejected(200), HeaderValue::from_static("2148916233"));

		assert_eq!(ErrorReason::classify(&response), None);
	}

	#[test]
	fn labels_round_trip() {
		for reason in ALL {
			assert_eq!(reason.as_str().parse::<ErrorReason>(), Ok(reason));
		}

		assert!("XBOX_NOT_LINKED".parse::<ErrorReason>().is_err());
		assert!(ErrorReason::XboxNotLinked.is_user_actionable());
		assert!(!ErrorReason::Outage.is_user_actionable());
	}
}
