use reqwest::{header, Client, Method, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{
    Category, NaturalLanguageTodo, NewCategory, Todo, TodoId, TodoPatch, TodoPayload,
};

/// HTTP client for the task/category backend.
///
/// Every call is a single attempt: no retries and no client-side timeout.
#[derive(Debug, Clone)]
pub struct TaskClient {
    client: Client,
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Result<Self, RequestError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| RequestError::Url(format!("{base_url}: {e}")))?;

        let client = Client::builder()
            .build()
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| RequestError::Url(format!("{raw}: {e}")))
    }

    /// Send one request and decode the body.
    ///
    /// JSON content types decode to [`ResponseBody::Json`]; anything else comes back as text.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ResponseBody, RequestError> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "sending request");

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "request failed to send");
            RequestError::Transport(e.to_string())
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let text = response
            .text()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = extract_error_message(&text);
            warn!(%method, path, status = status.as_u16(), %message, "request rejected");
            return Err(RequestError::Status {
                status: status.as_u16(),
                message,
            });
        }

        ResponseBody::decode(content_type.as_deref(), text)
    }

    async fn request_with<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ResponseBody, RequestError> {
        let body = serde_json::to_value(body).map_err(|e| RequestError::Parse(e.to_string()))?;
        self.request(method, path, Some(body)).await
    }

    /// GET /categories
    pub async fn list_categories(&self) -> Result<Vec<Category>, RequestError> {
        self.request(Method::GET, "/categories", None)
            .await?
            .into_list()
    }

    /// POST /categories
    pub async fn create_category(&self, name: &str) -> Result<(), RequestError> {
        self.request_with(Method::POST, "/categories", &NewCategory { name })
            .await
            .map(drop)
    }

    /// GET /todos
    pub async fn list_todos(&self) -> Result<Vec<Todo>, RequestError> {
        self.request(Method::GET, "/todos", None).await?.into_list()
    }

    /// POST /todos
    pub async fn create_todo(&self, payload: &TodoPayload) -> Result<(), RequestError> {
        self.request_with(Method::POST, "/todos", payload)
            .await
            .map(drop)
    }

    /// PUT /todos/{id}
    pub async fn update_todo(&self, id: TodoId, payload: &TodoPayload) -> Result<(), RequestError> {
        self.request_with(Method::PUT, &format!("/todos/{id}"), payload)
            .await
            .map(drop)
    }

    /// PATCH /todos/{id}
    pub async fn patch_todo(&self, id: TodoId, patch: &TodoPatch) -> Result<(), RequestError> {
        self.request_with(Method::PATCH, &format!("/todos/{id}"), patch)
            .await
            .map(drop)
    }

    /// DELETE /todos/{id}
    pub async fn delete_todo(&self, id: TodoId) -> Result<(), RequestError> {
        self.request(Method::DELETE, &format!("/todos/{id}"), None)
            .await
            .map(drop)
    }

    /// POST /todos/from-natural-language. The backend parses the sentence and creates the todo.
    pub async fn create_todo_from_text(&self, text: &str) -> Result<(), RequestError> {
        self.request_with(
            Method::POST,
            "/todos/from-natural-language",
            &NaturalLanguageTodo { text },
        )
        .await
        .map(drop)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// Non-success status; `message` is already human readable.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("invalid URL {0}")]
    Url(String),
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    fn decode(content_type: Option<&str>, text: String) -> Result<Self, RequestError> {
        let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));
        if !is_json {
            return Ok(Self::Text(text));
        }
        serde_json::from_str(&text)
            .map(Self::Json)
            .map_err(|e| RequestError::Parse(format!("invalid JSON body: {e}")))
    }

    /// Decode a list endpoint, accepting a bare array or an `items`/`data` envelope.
    ///
    /// Any other body (an object with neither field, or plain text) reads as an empty
    /// list. Malformed elements are still a parse error.
    pub fn into_list<T: DeserializeOwned>(self) -> Result<Vec<T>, RequestError> {
        let list = match self {
            Self::Json(Value::Array(items)) => Value::Array(items),
            Self::Json(Value::Object(mut fields)) => {
                match ["items", "data"]
                    .into_iter()
                    .find_map(|key| fields.remove(key).filter(is_present))
                {
                    Some(list) => list,
                    None => return Ok(Vec::new()),
                }
            }
            Self::Json(_) | Self::Text(_) => return Ok(Vec::new()),
        };
        serde_json::from_value(list).map_err(|e| RequestError::Parse(e.to_string()))
    }
}

/// Pull a human-readable message out of an error response body.
///
/// Prefers a JSON `detail` field, then `message`, and falls back to the raw body.
pub fn extract_error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    ["detail", "message"]
        .iter()
        .filter_map(|key| json.get(key))
        .find(|value| is_present(value))
        .map(describe)
        .unwrap_or_else(|| body.to_string())
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        // Validation errors arrive as `[{"loc": [...], "msg": "..."}]`.
        Value::Array(items) => items
            .iter()
            .map(|item| match item.get("msg").and_then(Value::as_str) {
                Some(msg) => msg.to_string(),
                None => describe(item),
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_message_prefers_detail() {
        let body = r#"{"detail": "Todo not found", "message": "ignored"}"#;
        assert_eq!(extract_error_message(body), "Todo not found");
    }

    #[test]
    fn error_message_falls_back_to_message_field() {
        assert_eq!(
            extract_error_message(r#"{"detail": "", "message": "Bad input"}"#),
            "Bad input"
        );
        assert_eq!(
            extract_error_message(r#"{"detail": null, "message": "Bad input"}"#),
            "Bad input"
        );
    }

    #[test]
    fn error_message_uses_raw_body_when_not_json() {
        assert_eq!(
            extract_error_message("Internal Server Error"),
            "Internal Server Error"
        );
    }

    #[test]
    fn error_message_uses_raw_body_when_json_lacks_fields() {
        let body = r#"{"error": "nope"}"#;
        assert_eq!(extract_error_message(body), body);
    }

    #[test]
    fn error_message_flattens_validation_errors() {
        let body = r#"{"detail": [{"loc": ["body", "title"], "msg": "field required"}, {"msg": "bad date"}]}"#;
        assert_eq!(extract_error_message(body), "field required; bad date");
    }

    #[test]
    fn body_decoding_follows_content_type() {
        assert_eq!(
            ResponseBody::decode(Some("application/json; charset=utf-8"), "[1]".into()).unwrap(),
            ResponseBody::Json(json!([1]))
        );
        assert_eq!(
            ResponseBody::decode(Some("text/plain"), "[1]".into()).unwrap(),
            ResponseBody::Text("[1]".into())
        );
        assert_eq!(
            ResponseBody::decode(None, String::new()).unwrap(),
            ResponseBody::Text(String::new())
        );
        assert!(ResponseBody::decode(Some("application/json"), "{oops".into()).is_err());
    }

    #[test]
    fn list_accepts_envelopes() {
        let bare = ResponseBody::Json(json!([{"id": 1, "name": "Work"}]));
        let items = ResponseBody::Json(json!({"items": [{"id": 1, "name": "Work"}]}));
        let data = ResponseBody::Json(json!({"data": [{"id": 1, "name": "Work"}]}));

        for body in [bare, items, data] {
            let categories: Vec<Category> = body.into_list().unwrap();
            assert_eq!(categories.len(), 1);
            assert_eq!(categories[0].name, "Work");
        }
    }

    #[test]
    fn list_falls_back_to_empty_for_unknown_shapes() {
        let bodies = [
            ResponseBody::Text("<html>".into()),
            ResponseBody::Json(json!({"results": [{"id": 1, "name": "Work"}]})),
            ResponseBody::Json(json!({"items": null})),
            ResponseBody::Json(json!("ok")),
        ];
        for body in bodies {
            assert!(body.into_list::<Category>().unwrap().is_empty());
        }
    }

    #[test]
    fn list_prefers_items_then_data() {
        let body = ResponseBody::Json(json!({
            "items": null,
            "data": [{"id": 2, "name": "Study"}]
        }));
        let categories: Vec<Category> = body.into_list().unwrap();
        assert_eq!(categories[0].name, "Study");
    }

    #[test]
    fn list_rejects_malformed_elements() {
        let body = ResponseBody::Json(json!({"items": [{"name": "no id"}]}));
        assert!(matches!(
            body.into_list::<Category>(),
            Err(RequestError::Parse(_))
        ));
    }

    #[test]
    fn new_rejects_invalid_base_url() {
        assert!(matches!(
            TaskClient::new("not a url"),
            Err(RequestError::Url(_))
        ));
        let client = TaskClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.endpoint("/todos/3").unwrap().as_str(),
            "http://localhost:8000/todos/3"
        );
    }
}
