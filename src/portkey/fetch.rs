//! Low-level helpers shared by every resource client: URL and query string
//! assembly, and turning upstream error bodies into readable messages.

use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde_json::Value;

use super::ClientError;

/// Join `path` onto the base URL and append the given query pairs.
///
/// The base URL's own path (typically `/v1`) is preserved; `Url::join` would
/// drop it for absolute paths.
pub fn build_url(base: &Url, path: &str, query: &[(String, String)]) -> Result<Url, ClientError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined).map_err(|e| ClientError::InvalidUrl(format!("{joined}: {e}")))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Flatten a params struct into query pairs.
///
/// Absent and `null` fields are skipped, arrays are comma-joined and nested
/// objects are sent as JSON text.
pub fn query_pairs<T: Serialize + ?Sized>(params: &T) -> Vec<(String, String)> {
    let Ok(Value::Object(map)) = serde_json::to_value(params) else {
        return Vec::new();
    };
    map.into_iter()
        .filter_map(|(key, value)| query_value(value).map(|v| (key, v)))
        .collect()
}

fn query_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.into_iter().filter_map(query_value).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(","))
            }
        }
        obj @ Value::Object(_) => Some(obj.to_string()),
    }
}

/// Extract the most useful message from an upstream error body.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| message_from_json(&json))
        .unwrap_or_else(|| format!("HTTP error, status {}", status.as_u16()))
}

fn message_from_json(json: &Value) -> Option<String> {
    let candidates = [
        json.pointer("/error/message"),
        json.get("message"),
        json.get("error"),
        json.get("detail"),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str().filter(|s| !s.is_empty()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Url {
        Url::parse("https://api.portkey.ai/v1").unwrap()
    }

    #[test]
    fn build_url_keeps_version_prefix() {
        let url = build_url(&base(), "/admin/users", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.portkey.ai/v1/admin/users");
    }

    #[test]
    fn build_url_tolerates_trailing_slash() {
        let base = Url::parse("http://localhost:8787/v1/").unwrap();
        let url = build_url(&base, "configs", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8787/v1/configs");
    }

    #[test]
    fn build_url_encodes_query() {
        let query = vec![
            ("search".to_string(), "hello world".to_string()),
            ("page_size".to_string(), "10".to_string()),
        ];
        let url = build_url(&base(), "/prompts", &query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.portkey.ai/v1/prompts?search=hello+world&page_size=10"
        );
    }

    #[test]
    fn query_pairs_skips_missing_values() {
        #[derive(Serialize)]
        struct Params {
            workspace_id: Option<String>,
            current_page: Option<u32>,
            page_size: Option<u32>,
        }
        let pairs = query_pairs(&Params {
            workspace_id: Some("ws-1".into()),
            current_page: None,
            page_size: Some(25),
        });
        assert_eq!(
            pairs,
            vec![
                ("page_size".to_string(), "25".to_string()),
                ("workspace_id".to_string(), "ws-1".to_string()),
            ]
        );
    }

    #[test]
    fn query_pairs_joins_arrays_and_encodes_objects() {
        let pairs = query_pairs(&json!({
            "ids": ["a", "b"],
            "empty": [],
            "filter": {"k": "v"},
            "flag": true,
        }));
        assert!(pairs.contains(&("ids".into(), "a,b".into())));
        assert!(pairs.contains(&("filter".into(), r#"{"k":"v"}"#.into())));
        assert!(pairs.contains(&("flag".into(), "true".into())));
        assert!(!pairs.iter().any(|(k, _)| k == "empty"));
    }

    #[test]
    fn error_message_prefers_nested_message() {
        let body = r#"{"error":{"message":"workspace not found","type":"not_found"}}"#;
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, body),
            "workspace not found"
        );
    }

    #[test]
    fn error_message_reads_flat_fields() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message":"bad slug"}"#),
            "bad slug"
        );
        assert_eq!(
            error_message(StatusCode::FORBIDDEN, r#"{"success":false,"error":"forbidden"}"#),
            "forbidden"
        );
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>oops</html>"),
            "HTTP error, status 502"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":{}}"#),
            "HTTP error, status 500"
        );
    }
}
