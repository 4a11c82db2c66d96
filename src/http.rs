//! Transport contract for token exchanges.
//!
//! The exchange steps depend on nothing but [`ExchangeTransport`]: a single blocking
//! `send` that turns an [`ExchangeRequest`] into an [`ExchangeResponse`]. Implementations
//! report connection, timeout and protocol problems as [`TransportError`]; any HTTP status,
//! including 4xx and 5xx, is a normal response that the caller inspects. Transports must not
//! retry or follow redirects on the pipeline's behalf.
//!
//! [`ReqwestTransport`] (feature `reqwest`, enabled by default) is the bundled production
//! implementation.

pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header};

// std
#[cfg(feature = "reqwest")] use std::time::Duration as StdDuration;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::{
	blocking::{Client as BlockingClient, Response as BlockingResponse},
	redirect::Policy,
};
use serde_json::Value;
// self
#[cfg(feature = "reqwest")] use crate::error::ConfigError;
use crate::{
	_prelude::*,
	error::TransportError,
	json::{JsonArrayDocument, JsonMapper, JsonMappingError, JsonObjectDocument},
};

const APPLICATION_JSON: &str = "application/json";

/// Performs one blocking request/response round trip.
///
/// The calling thread is blocked until a complete response or a failure is available.
/// Each call is a single attempt: no retries, no redirect following. Implementations must
/// be `Send + Sync` so one transport can serve concurrent chains; the pipeline adds no
/// locking of its own.
pub trait ExchangeTransport
where
	Self: Send + Sync,
{
	/// Sends `request` and returns whatever the peer answered, success or not.
	fn send(&self, request: &ExchangeRequest) -> Result<ExchangeResponse, TransportError>;
}
impl<T> ExchangeTransport for &T
where
	T: ?Sized + ExchangeTransport,
{
	fn send(&self, request: &ExchangeRequest) -> Result<ExchangeResponse, TransportError> {
		(**self).send(request)
	}
}
impl<T> ExchangeTransport for Arc<T>
where
	T: ?Sized + ExchangeTransport,
{
	fn send(&self, request: &ExchangeRequest) -> Result<ExchangeResponse, TransportError> {
		(**self).send(request)
	}
}
impl<T> ExchangeTransport for Box<T>
where
	T: ?Sized + ExchangeTransport,
{
	fn send(&self, request: &ExchangeRequest) -> Result<ExchangeResponse, TransportError> {
		(**self).send(request)
	}
}

/// Immutable description of one outbound call.
#[derive(Clone, PartialEq)]
pub struct ExchangeRequest {
	/// Target URL.
	pub url: Url,
	/// HTTP method.
	pub method: Method,
	/// Request headers; a name may carry several values.
	pub headers: HeaderMap,
	/// Optional JSON body.
	pub json_body: Option<Value>,
}
impl ExchangeRequest {
	/// Creates a bodiless request.
	pub fn new(method: Method, url: Url) -> Self {
		Self { url, method, headers: HeaderMap::new(), json_body: None }
	}

	/// Creates a `POST` request that accepts and sends JSON.
	pub fn post_json(url: Url, body: Value) -> Self {
		Self::new(Method::POST, url)
			.with_header(header::ACCEPT, HeaderValue::from_static(APPLICATION_JSON))
			.with_header(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))
			.with_json_body(body)
	}

	/// Appends a header value, keeping any earlier values for the same name.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.append(name, value);

		self
	}

	/// Sets the JSON body.
	pub fn with_json_body(mut self, body: Value) -> Self {
		self.json_body = Some(body);

		self
	}

	/// Serializes the JSON body for transports that send raw text.
	pub fn body_text(&self) -> Option<String> {
		self.json_body.as_ref().map(Value::to_string)
	}
}
impl Debug for ExchangeRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		// Bodies carry the credential being exchanged.
		f.debug_struct("ExchangeRequest")
			.field("url", &self.url.as_str())
			.field("method", &self.method)
			.field("headers", &self.headers)
			.field("json_body", &self.json_body.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

/// Immutable description of one inbound result.
#[derive(Clone, PartialEq, Eq)]
pub struct ExchangeResponse {
	/// HTTP status code.
	pub status: StatusCode,
	/// Response headers, duplicates and non-UTF-8 values included.
	pub headers: HeaderMap,
	/// Raw response body.
	pub body: String,
}
impl ExchangeResponse {
	/// Creates a response with the given status, no headers and an empty body.
	pub fn new(status: StatusCode) -> Self {
		Self { status, headers: HeaderMap::new(), body: String::new() }
	}

	/// Appends a header value, keeping any earlier values for the same name.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.append(name, value);

		self
	}

	/// Replaces the body.
	pub fn with_body(mut self, body: impl Into<String>) -> Self {
		self.body = body.into();

		self
	}

	/// Whether the status is in `200..=299`.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Parses the body as a JSON object; a blank body reads as the empty object.
	pub fn json_object(&self) -> Result<JsonObjectDocument, JsonMappingError> {
		if self.body.trim().is_empty() {
			return Ok(JsonObjectDocument::empty());
		}

		JsonMapper::parse_object(&self.body)
	}

	/// Parses the body as a JSON array; a blank body reads as the empty array.
	pub fn json_array(&self) -> Result<JsonArrayDocument, JsonMappingError> {
		if self.body.trim().is_empty() {
			return Ok(JsonArrayDocument::empty());
		}

		JsonMapper::parse_array(&self.body)
	}
}
impl Debug for ExchangeResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		// Successful bodies carry freshly minted tokens.
		f.debug_struct("ExchangeResponse")
			.field("status", &self.status)
			.field("headers", &self.headers)
			.field("body_len", &self.body.len())
			.finish()
	}
}

/// Settings for the bundled reqwest transport.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct TransportConfig {
	/// Total deadline per request; `None` disables it.
	pub timeout: Option<StdDuration>,
	/// Deadline for establishing the connection; `None` disables it.
	pub connect_timeout: Option<StdDuration>,
	/// `user-agent` header sent with every request.
	pub user_agent: String,
}
#[cfg(feature = "reqwest")]
impl Default for TransportConfig {
	fn default() -> Self {
		Self {
			timeout: Some(StdDuration::from_secs(30)),
			connect_timeout: Some(StdDuration::from_secs(10)),
			user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
		}
	}
}

/// Blocking reqwest transport.
///
/// Redirects are never followed: the token endpoints answer directly, and a redirect would
/// resend the credential to another host. Do not call it from inside an async runtime;
/// `reqwest::blocking` spins up its own.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(BlockingClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport from [`TransportConfig::default`].
	pub fn new() -> Result<Self> {
		Self::from_config(&TransportConfig::default())
	}

	/// Builds a transport from explicit settings.
	pub fn from_config(config: &TransportConfig) -> Result<Self> {
		let mut builder =
			BlockingClient::builder().redirect(Policy::none()).user_agent(config.user_agent.as_str());

		if let Some(timeout) = config.timeout {
			builder = builder.timeout(timeout);
		}
		if let Some(timeout) = config.connect_timeout {
			builder = builder.connect_timeout(timeout);
		}

		let client = builder.build().map_err(ConfigError::from)?;

		Ok(Self(client))
	}

	/// Wraps a caller-built client. Configure it to not follow redirects.
	pub fn with_client(client: BlockingClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<BlockingClient> for ReqwestTransport {
	fn as_ref(&self) -> &BlockingClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ExchangeTransport for ReqwestTransport {
	fn send(&self, request: &ExchangeRequest) -> Result<ExchangeResponse, TransportError> {
		let mut builder = self
			.0
			.request(request.method.clone(), request.url.clone())
			.headers(request.headers.clone());

		if let Some(body) = request.body_text() {
			builder = builder.body(body);
		}

		read_response(builder.send()?)
	}
}

#[cfg(feature = "reqwest")]
fn read_response(response: BlockingResponse) -> Result<ExchangeResponse, TransportError> {
	let status = response.status();
	let headers = response.headers().clone();
	let body = response.text()?;

	Ok(ExchangeResponse { status, headers, body })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn endpoint() -> Url {
		Url::parse("https://user.auth.xboxlive.com/user/authenticate")
			.expect("Fixture URL should parse.")
	}

	#[test]
	fn success_range_is_inclusive() {
		for (status, success) in [(199, false), (200, true), (299, true), (300, false)] {
			let status = StatusCode::from_u16(status).expect("Fixture status should be valid.");

			assert_eq!(ExchangeResponse::new(status).is_success(), success, "{status}");
		}
	}

	#[test]
	fn blank_bodies_read_as_empty_views() {
		let response = ExchangeResponse::new(StatusCode::OK).with_body("  \n");
		let object = response.json_object().expect("Blank body should read as an empty object.");
		let array = response.json_array().expect("Blank body should read as an empty array.");

		assert!(object.is_empty());
		assert!(array.is_empty());
	}

	#[test]
	fn post_json_sets_content_negotiation_headers() {
		let request = ExchangeRequest::post_json(endpoint(), serde_json::json!({ "a": 1 }));

		assert_eq!(request.method, Method::POST);
		assert_eq!(request.headers[header::ACCEPT], "application/json");
		assert_eq!(request.headers[header::CONTENT_TYPE], "application/json");
		assert_eq!(request.body_text().as_deref(), Some(r#"{"a":1}"#));
	}

	#[test]
	fn debug_output_redacts_bodies() {
		let request =
			ExchangeRequest::post_json(endpoint(), serde_json::json!({ "RpsTicket": "d=secret" }));
		let response = ExchangeResponse::new(StatusCode::OK).with_body(r#"{"Token":"secret"}"#);

		assert!(!format!("{request:?}").contains("secret"));
		assert!(!format!("{response:?}").contains("secret"));
	}

	#[test]
	fn repeated_headers_keep_every_value() {
		let cookie = HeaderName::from_static("set-cookie");
		let response = ExchangeResponse::new(StatusCode::FORBIDDEN)
			.with_header(HeaderName::from_static("xerr"), HeaderValue::from_static("2148916233"))
			.with_header(HeaderName::from_static("xerr"), HeaderValue::from_static("2148916238"))
			.with_header(cookie.clone(), HeaderValue::from_static("a=1"))
			.with_header(cookie.clone(), HeaderValue::from_static("b=2"));
		let cookies = response.headers.get_all(&cookie).iter().collect::<Vec<_>>();

		assert_eq!(response.headers.len(), 4);
		assert_eq!(response.headers["xerr"], "2148916233");
		assert_eq!(cookies, [&HeaderValue::from_static("a=1"), &HeaderValue::from_static("b=2")]);
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn default_transport_builds() {
		assert!(ReqwestTransport::new().is_ok());
	}
}
