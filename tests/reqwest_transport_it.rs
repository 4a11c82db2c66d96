#![cfg(feature = "reqwest")]

// std
use std::{net::TcpListener, time::Duration};
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use xbl_token_chain::{
	error::TransportError,
	http::{ExchangeRequest, ExchangeTransport, ReqwestTransport, StatusCode, TransportConfig, header},
	url::Url,
};

fn post(server: &MockServer, path: &str) -> ExchangeRequest {
	let url = Url::parse(&server.url(path)).expect("Mock server URL should parse.");

	ExchangeRequest::post_json(url, json!({ "identityToken": "XBL3.0 x=1;token" }))
}

#[test]
fn sends_json_post_with_negotiation_headers() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(POST)
			.path("/authentication/login_with_xbox")
			.header("content-type", "application/json")
			.header("accept", "application/json")
			.header("user-agent", concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.json_body(json!({ "identityToken": "XBL3.0 x=1;token" }));
		then.status(200)
			.header("content-type", "application/json")
			.body(r#"{"access_token":"mc"}"#);
	});
	let transport = ReqwestTransport::new().expect("Transport should build.");
	let response = transport
		.send(&post(&server, "/authentication/login_with_xbox"))
		.expect("Request should complete.");

	mock.assert();
	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(response.headers[header::CONTENT_TYPE], "application/json");
	assert_eq!(response.body, r#"{"access_token":"mc"}"#);
}

#[test]
fn error_statuses_are_responses() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(POST).path("/xsts/authorize");
		then.status(401).header("XErr", "2148916233").body(r#"{"XErr":2148916233}"#);
	});
	let transport = ReqwestTransport::new().expect("Transport should build.");
	let response =
		transport.send(&post(&server, "/xsts/authorize")).expect("401 is not a transport error.");

	mock.assert_calls(1);
	assert_eq!(response.status, StatusCode::UNAUTHORIZED);
	assert!(!response.is_success());
	assert_eq!(response.headers["xerr"], "2148916233");
}

#[test]
fn redirects_are_not_followed() {
	let server = MockServer::start();
	let redirect = server.mock(|when, then| {
		when.method(POST).path("/user/authenticate");
		then.status(302).header("location", server.url("/elsewhere"));
	});
	let elsewhere = server.mock(|when, then| {
		when.path("/elsewhere");
		then.status(200);
	});
	let transport = ReqwestTransport::new().expect("Transport should build.");
	let response =
		transport.send(&post(&server, "/user/authenticate")).expect("Request should complete.");

	redirect.assert();
	elsewhere.assert_calls(0);
	assert_eq!(response.status, StatusCode::FOUND);
}

#[test]
fn slow_responses_time_out() {
	let server = MockServer::start();
	let _slow = server.mock(|when, then| {
		when.method(POST).path("/slow");
		then.status(200).delay(Duration::from_secs(2)).body("{}");
	});
	let config =
		TransportConfig { timeout: Some(Duration::from_millis(200)), ..Default::default() };
	let transport = ReqwestTransport::from_config(&config).expect("Transport should build.");
	let err = transport.send(&post(&server, "/slow")).expect_err("Request should time out.");

	assert!(matches!(err, TransportError::Timeout { .. }), "unexpected error: {err:?}");
}

#[test]
fn unreachable_host_is_a_transport_error() {
	let port = {
		let listener = TcpListener::bind("127.0.0.1:0").expect("Ephemeral port should bind.");

		listener.local_addr().expect("Listener should have an address.").port()
	};
	let url = Url::parse(&format!("http://127.0.0.1:{port}/user/authenticate"))
		.expect("Loopback URL should parse.");
	let transport = ReqwestTransport::new().expect("Transport should build.");
	let err = transport
		.send(&ExchangeRequest::post_json(url, json!({})))
		.expect_err("Closed port should refuse the connection.");

	assert!(matches!(err, TransportError::Network { .. }), "unexpected error: {err:?}");
}
