//! The `http` backend: `POST {"task": "..."}` to the agent's endpoint.

use std::time::Duration;

use crate::error::{SubAgentError, SubAgentResult};

/// Call a remote `http` SubAgent: `POST <endpoint>` with body
/// `{"task": "..."}`, parsing `reply` or `result` from the JSON response.
///
/// Network errors (connection refused, DNS failure, non-2xx status,
/// timeout) are all mapped to [`SubAgentError::HttpRequestFailed`] with a
/// message naming the underlying cause; a 2xx body missing both `reply` and
/// `result` is [`SubAgentError::HttpResponseMalformed`].
pub async fn call_http_backend(
    client: &reqwest::Client,
    endpoint: &str,
    task: &str,
    timeout: Duration,
) -> SubAgentResult<String> {
    let response = client
        .post(endpoint)
        .json(&serde_json::json!({"task": task}))
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| SubAgentError::HttpRequestFailed(describe_reqwest_error(&e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SubAgentError::HttpRequestFailed(format!("HTTP {status}")));
    }

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| SubAgentError::HttpRequestFailed(format!("invalid JSON response: {e}")))?;

    body.get("reply")
        .or_else(|| body.get("result"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or(SubAgentError::HttpResponseMalformed)
}

fn describe_reqwest_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    }
}
