//! Verify request building and response handling against the JSON test
//! vectors stored in `test-vectors/`.
//!
//! Each case feeds a simulated response through `ApiService` with a canned
//! transport that also checks the outgoing request. Parsed results are
//! compared as values, not raw strings, so field order does not matter.

use std::time::Duration;

use challenge_core::{
    ApiError, ApiService, ChallengeEntity, ClientConfig, Endpoint, HttpMethod, HttpRequest, HttpResponse,
    SurvivalChallengeApi, Transport,
};

/// Answers with one simulated response after checking the request.
struct Vector {
    expected: HttpRequest,
    response: HttpResponse,
}

impl Transport for Vector {
    fn send(&self, request: &HttpRequest, _timeout: Duration) -> challenge_core::Result<HttpResponse> {
        assert_eq!(request, &self.expected, "outgoing request");
        Ok(self.response.clone())
    }
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn load() -> serde_json::Value {
    let raw = include_str!("../../test-vectors/fetch_challenges.json");
    serde_json::from_str(raw).unwrap()
}

fn config(vectors: &serde_json::Value) -> ClientConfig {
    ClientConfig {
        base_url: vectors["config"]["base_url"].as_str().unwrap().to_string(),
        sign: vectors["config"]["sign"].as_str().unwrap().to_string(),
        ..ClientConfig::default()
    }
}

fn expected_request(vectors: &serde_json::Value) -> HttpRequest {
    let req = &vectors["expected_request"];
    HttpRequest {
        method: parse_method(req["method"].as_str().unwrap()),
        url: req["url"].as_str().unwrap().to_string(),
        headers: req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect(),
        body: None,
    }
}

#[test]
fn request_matches_vector() {
    let vectors = load();
    let req = SurvivalChallengeApi::new(&config(&vectors)).build_request().unwrap();
    assert_eq!(req, expected_request(&vectors));
}

#[test]
fn fetch_challenges_test_vectors() {
    let vectors = load();
    let config = config(&vectors);
    let expected = expected_request(&vectors);

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let transport = Vector {
            expected: expected.clone(),
            response: HttpResponse {
                status: sim["status"].as_u64().unwrap() as u16,
                headers: Vec::new(),
                body: sim["body"].as_str().unwrap().to_string(),
            },
        };
        let result = ApiService::with_transport(config.clone(), transport).fetch_challenges();

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "NoData" => assert!(matches!(err, ApiError::NoData), "{name}: expected NoData, got {err}"),
                "HttpStatus" => assert!(matches!(err, ApiError::HttpStatus { .. }), "{name}: expected HttpStatus, got {err}"),
                "Decoding" => assert!(matches!(err, ApiError::Decoding(_)), "{name}: expected Decoding, got {err}"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            assert_eq!(i64::from(err.code()), case["expected_code"].as_i64().unwrap(), "{name}: code");
        } else {
            let challenges = result.unwrap_or_else(|e| panic!("{name}: {e}"));
            let expected: Vec<ChallengeEntity> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(challenges, expected, "{name}: parsed result");
        }
    }
}
