use crate::config::EnvConfig;
use crate::models::{AnalysisRecord, HistoryResponse};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub(crate) const SIGNUP_FAILED: &str = "Signup failed";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{context} ({status})")]
    Request { context: &'static str, status: u16 },

    /// Rejection with a message supplied by the backend.
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response: {0}")]
    Parse(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginResponse {
    pub access: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AnalyzeRequest {
    pub input_text: String,
}

/// Error body returned by the signup endpoint.
#[derive(Deserialize, Clone, Debug, Default)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Backend operations used by the session and analyzer flows.
///
/// Each call is a single attempt: no retries, no timeouts beyond the transport's.
#[async_trait(?Send)]
pub(crate) trait SentimentApi {
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse>;
    async fn signup(&self, username: &str, password: &str, email: &str) -> ApiResult<()>;
    async fn analyze(&self, text: &str, token: &str) -> ApiResult<AnalysisRecord>;
    async fn list_history(&self, token: &str) -> ApiResult<Vec<AnalysisRecord>>;
    async fn delete(&self, id: &str, token: &str) -> ApiResult<()>;
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn delete_path(id: &str) -> String {
        format!("/api/sentiment/delete/{}/", urlencoding::encode(id))
    }

    fn with_auth_headers(req: reqwest::RequestBuilder, token: &str) -> reqwest::RequestBuilder {
        req.header("Authorization", format!("Bearer {}", token))
    }

    /// Sends the request and maps a non-2xx status to `ApiError::Request`.
    async fn send(
        req: reqwest::RequestBuilder,
        context: &'static str,
    ) -> ApiResult<reqwest::Response> {
        let res = req.send().await.map_err(ApiError::network)?;
        if res.status().is_success() {
            Ok(res)
        } else {
            Err(ApiError::Request {
                context,
                status: res.status().as_u16(),
            })
        }
    }
}

/// Message to surface for a rejected signup: the body's `message`, else the default.
pub(crate) fn signup_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| SIGNUP_FAILED.to_string())
}

#[async_trait(?Send)]
impl SentimentApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        log::debug!("POST /api/auth/login/ as {username}");
        let req = reqwest::Client::new()
            .post(self.url("/api/auth/login/"))
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            });
        let res = Self::send(req, "Login failed").await?;
        res.json().await.map_err(ApiError::parse)
    }

    async fn signup(&self, username: &str, password: &str, email: &str) -> ApiResult<()> {
        log::debug!("POST /api/auth/signup/ as {username}");
        let res = reqwest::Client::new()
            .post(self.url("/api/auth/signup/"))
            .json(&SignupRequest {
                username: username.to_string(),
                password: password.to_string(),
                email: email.to_string(),
            })
            .send()
            .await
            .map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(())
        } else {
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::Rejected(signup_error_message(&body)))
        }
    }

    async fn analyze(&self, text: &str, token: &str) -> ApiResult<AnalysisRecord> {
        log::debug!("POST /api/sentiment/analyze/ ({} chars)", text.chars().count());
        let req = reqwest::Client::new()
            .post(self.url("/api/sentiment/analyze/"))
            .json(&AnalyzeRequest {
                input_text: text.to_string(),
            });
        let res = Self::send(Self::with_auth_headers(req, token), "Analysis failed").await?;
        res.json().await.map_err(ApiError::parse)
    }

    async fn list_history(&self, token: &str) -> ApiResult<Vec<AnalysisRecord>> {
        log::debug!("GET /api/sentiment/history/");
        let req = reqwest::Client::new().get(self.url("/api/sentiment/history/"));
        let res = Self::send(Self::with_auth_headers(req, token), "Failed to fetch history").await?;
        let data: HistoryResponse = res.json().await.map_err(ApiError::parse)?;
        Ok(data.results)
    }

    async fn delete(&self, id: &str, token: &str) -> ApiResult<()> {
        let path = Self::delete_path(id);
        log::debug!("DELETE {path}");
        let req = reqwest::Client::new().delete(self.url(&path));
        Self::send(Self::with_auth_headers(req, token), "Delete failed").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_contract_deserialize() {
        let json = r#"{"access": "jwt-token", "refresh": "r"}"#;
        let parsed: LoginResponse =
            serde_json::from_str(json).expect("login response should parse");
        assert_eq!(parsed.access, "jwt-token");
    }

    #[test]
    fn test_signup_request_serialization() {
        let req = SignupRequest {
            username: "bob".to_string(),
            password: "pw2".to_string(),
            email: "bob@x.com".to_string(),
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["username"], "bob");
        assert_eq!(v["email"], "bob@x.com");
    }

    #[test]
    fn test_analyze_request_uses_input_text_key() {
        let v = serde_json::to_value(AnalyzeRequest {
            input_text: "hello".to_string(),
        })
        .unwrap();
        assert_eq!(v, serde_json::json!({ "input_text": "hello" }));
    }

    #[test]
    fn test_signup_error_message_from_body() {
        let msg = signup_error_message(r#"{"message": "Username already exists"}"#);
        assert_eq!(msg, "Username already exists");
    }

    #[test]
    fn test_signup_error_message_fallback() {
        assert_eq!(signup_error_message(""), "Signup failed");
        assert_eq!(signup_error_message("<html>500</html>"), "Signup failed");
        assert_eq!(signup_error_message(r#"{"detail": "x"}"#), "Signup failed");
        assert_eq!(signup_error_message(r#"{"message": ""}"#), "Signup failed");
    }

    #[test]
    fn test_api_client_trims_base_url() {
        let client = ApiClient::new("http://localhost:8000/".to_string());
        assert_eq!(
            client.url("/api/auth/login/"),
            "http://localhost:8000/api/auth/login/"
        );
    }

    #[test]
    fn test_delete_path_encodes_id() {
        assert_eq!(ApiClient::delete_path("17"), "/api/sentiment/delete/17/");
        assert_eq!(ApiClient::delete_path("a/b"), "/api/sentiment/delete/a%2Fb/");
    }

    #[test]
    fn test_request_error_display() {
        let e = ApiError::Request {
            context: "Analysis failed",
            status: 401,
        };
        assert_eq!(e.to_string(), "Analysis failed (401)");
    }
}
