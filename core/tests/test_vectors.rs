//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use feedback_core::{
    ApiError, FeedbackClient, FeedbackPage, FeedbackRequest, HttpMethod, HttpRequest, HttpResponse,
};

const BASE_URL: &str = "http://localhost:8088/api/v1";

fn client() -> FeedbackClient {
    FeedbackClient::new(BASE_URL)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    match expected.get("body") {
        Some(body) => {
            let req_body: serde_json::Value =
                serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_expected_error(name: &str, expected: &str, err: ApiError) {
    let matched = match expected {
        "NotFound" => matches!(err, ApiError::NotFound { .. }),
        "Unauthorized" => matches!(err, ApiError::Unauthorized { .. }),
        "Validation" => matches!(err, ApiError::Validation { .. }),
        "Server" => matches!(err, ApiError::Server { .. }),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {expected}, got {err:?}");
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

#[test]
fn save_feedback_test_vectors() {
    let raw = include_str!("../../test-vectors/save_feedback.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: FeedbackRequest = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_save_feedback(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_save_feedback(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, expected_error.as_str().unwrap(), result.unwrap_err());
        } else {
            let id = result.unwrap();
            assert_eq!(id, case["expected_result"].as_i64().unwrap(), "{name}: parsed id");
        }
    }
}

// ---------------------------------------------------------------------------
// Find all by book
// ---------------------------------------------------------------------------

#[test]
fn find_all_feedback_by_book_test_vectors() {
    let raw = include_str!("../../test-vectors/find_all_feedback_by_book.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let book_id = input["book_id"].as_i64().unwrap();
        let page = input["page"].as_u64().map(|p| p as u32);
        let size = input["size"].as_u64().map(|s| s as u32);

        let req = c.build_find_all_feedback_by_book(book_id, page, size);
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_find_all_feedback_by_book_response(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, expected_error.as_str().unwrap(), result.unwrap_err());
        } else {
            let envelope = result.unwrap();
            assert_eq!(envelope.status, 200, "{name}: status");
            let expected: FeedbackPage =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(envelope.body, expected, "{name}: parsed result");
        }
    }
}
