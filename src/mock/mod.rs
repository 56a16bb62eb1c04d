//! Mock short-circuit for development without a live backend.
//!
//! Activated by the process-wide config switch (`MOCK_PROXY=1`), the
//! `?mock=1` query flag, or the `x-mock: 1` header. When none of those
//! hold, nothing in this module is reachable.

use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::config::schema::MockConfig;
use crate::http::response::{X_PROXY, X_PROXY_MOCK};
use crate::routing::target::query_param;

pub const X_MOCK: &str = "x-mock";

/// Decide whether this request should be served from the mock table.
pub fn requested(config: &MockConfig, headers: &HeaderMap, raw_query: Option<&str>) -> bool {
    if config.enabled {
        return true;
    }
    if headers
        .get(X_MOCK)
        .and_then(|value| value.to_str().ok())
        == Some("1")
    {
        return true;
    }
    query_param(raw_query, "mock").as_deref() == Some("1")
}

/// Serve a canned response keyed on method + resolved path.
pub fn respond(method: &Method, path: &str) -> Response {
    let path = path.trim_matches('/');
    let (status, body) = if method == Method::GET && path == "questions" {
        (StatusCode::OK, questions_page())
    } else if method == Method::POST && path == "votes" {
        (StatusCode::CREATED, vote_receipt())
    } else {
        (
            StatusCode::NOT_FOUND,
            json!({ "error": "No mock for this path" }),
        )
    };

    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(X_PROXY, HeaderValue::from_static(X_PROXY_MOCK));
    response
}

fn questions_page() -> Value {
    json!({
        "content": [
            {
                "id": 1,
                "title": "Should remote work be the default?",
                "optionA": "Yes, office is optional",
                "optionB": "No, office comes first",
                "votesA": 128,
                "votesB": 97,
                "commentCount": 14
            },
            {
                "id": 2,
                "title": "Tabs or spaces?",
                "optionA": "Tabs",
                "optionB": "Spaces",
                "votesA": 54,
                "votesB": 61,
                "commentCount": 33
            }
        ],
        "page": 0,
        "size": 20,
        "totalElements": 2
    })
}

fn vote_receipt() -> Value {
    json!({
        "questionId": 1,
        "choice": "A",
        "counted": true
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_config_without_flags_is_unreachable() {
        let config = MockConfig { enabled: false };
        assert!(!requested(&config, &HeaderMap::new(), None));
        assert!(!requested(&config, &HeaderMap::new(), Some("x=1&mock=0")));
    }

    #[test]
    fn activation_paths() {
        let enabled = MockConfig { enabled: true };
        assert!(requested(&enabled, &HeaderMap::new(), None));

        let disabled = MockConfig { enabled: false };
        assert!(requested(&disabled, &HeaderMap::new(), Some("mock=1")));

        let mut headers = HeaderMap::new();
        headers.insert(X_MOCK, HeaderValue::from_static("1"));
        assert!(requested(&disabled, &headers, None));
    }

    #[test]
    fn questions_fixture_has_exactly_two_entries() {
        let page = questions_page();
        assert_eq!(page["content"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn unknown_path_gets_404() {
        let response = respond(&Method::GET, "users/7");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers().get(X_PROXY).unwrap(), X_PROXY_MOCK);
    }

    #[test]
    fn path_matching_tolerates_surrounding_slashes() {
        let response = respond(&Method::GET, "/questions/");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn method_is_part_of_the_key() {
        let response = respond(&Method::DELETE, "questions");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
