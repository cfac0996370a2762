//! In-memory stand-in for the sentiment backend, used by native tests.

use crate::api::{signup_error_message, ApiError, ApiResult, LoginResponse, SentimentApi};
use crate::models::{AnalysisRecord, Author};
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

pub(crate) fn jwt_with_claims(claims: &str) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims)
    )
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    users: RefCell<HashMap<String, String>>,
    admins: RefCell<HashSet<String>>,
    records: RefCell<Vec<AnalysisRecord>>,
    next_id: Cell<u64>,
    fail_analyze: Cell<bool>,
    blank_tokens: Cell<bool>,
    signup_error_body: RefCell<Option<String>>,
    login_calls: Cell<usize>,
    analyze_calls: Cell<usize>,
    history_calls: Cell<usize>,
}

impl FakeBackend {
    pub fn with_user(username: &str, password: &str) -> Self {
        let backend = Self::default();
        backend.add_user(username, password);
        backend
    }

    pub fn add_user(&self, username: &str, password: &str) {
        self.users
            .borrow_mut()
            .insert(username.to_string(), password.to_string());
    }

    pub fn add_admin(&self, username: &str, password: &str) {
        self.add_user(username, password);
        self.admins.borrow_mut().insert(username.to_string());
    }

    pub fn set_fail_analyze(&self, fail: bool) {
        self.fail_analyze.set(fail);
    }

    /// Successful logins answer with an empty `access` token.
    pub fn set_blank_tokens(&self, blank: bool) {
        self.blank_tokens.set(blank);
    }

    /// Every signup is rejected with this raw response body.
    pub fn set_signup_error_body(&self, body: &str) {
        *self.signup_error_body.borrow_mut() = Some(body.to_string());
    }

    pub fn records(&self) -> Vec<AnalysisRecord> {
        self.records.borrow().clone()
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.get()
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_calls.get()
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.get()
    }

    fn token_for(&self, username: &str) -> String {
        if self.admins.borrow().contains(username) {
            jwt_with_claims(&format!(r#"{{"username":"{username}","role":"admin"}}"#))
        } else {
            format!("tok-{username}")
        }
    }

    fn user_for_token(&self, token: &str) -> ApiResult<String> {
        self.users
            .borrow()
            .keys()
            .find(|u| self.token_for(u) == token)
            .cloned()
            .ok_or(ApiError::Request {
                context: "Unauthorized",
                status: 401,
            })
    }
}

#[async_trait(?Send)]
impl SentimentApi for FakeBackend {
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        self.login_calls.set(self.login_calls.get() + 1);
        match self.users.borrow().get(username) {
            Some(pw) if pw == password => Ok(LoginResponse {
                access: if self.blank_tokens.get() {
                    String::new()
                } else {
                    self.token_for(username)
                },
            }),
            _ => Err(ApiError::Request {
                context: "Login failed",
                status: 401,
            }),
        }
    }

    async fn signup(&self, username: &str, password: &str, _email: &str) -> ApiResult<()> {
        if let Some(body) = self.signup_error_body.borrow().as_deref() {
            return Err(ApiError::Rejected(signup_error_message(body)));
        }
        if self.users.borrow().contains_key(username) {
            return Err(ApiError::Rejected(
                "A user with that username already exists.".to_string(),
            ));
        }
        self.add_user(username, password);
        Ok(())
    }

    async fn analyze(&self, text: &str, token: &str) -> ApiResult<AnalysisRecord> {
        self.analyze_calls.set(self.analyze_calls.get() + 1);
        if self.fail_analyze.get() {
            return Err(ApiError::Request {
                context: "Analysis failed",
                status: 401,
            });
        }
        let username = self.user_for_token(token)?;

        let (sentiment, score) = if text.contains("love") {
            ("Positive", 0.5)
        } else if text.contains("hate") {
            ("Negative", -0.8)
        } else {
            ("Neutral", 0.0)
        };

        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let record = AnalysisRecord {
            id: id.to_string(),
            input_text: text.to_string(),
            sentiment: sentiment.to_string(),
            polarity_score: Some(score),
            created_at: "2024-03-01T10:15:00Z".to_string(),
            author: Some(Author { username }),
        };
        self.records.borrow_mut().insert(0, record.clone());
        Ok(record)
    }

    async fn list_history(&self, token: &str) -> ApiResult<Vec<AnalysisRecord>> {
        self.history_calls.set(self.history_calls.get() + 1);
        self.user_for_token(token)?;
        Ok(self.records())
    }

    async fn delete(&self, id: &str, token: &str) -> ApiResult<()> {
        let username = self.user_for_token(token)?;
        if !self.admins.borrow().contains(&username) {
            return Err(ApiError::Request {
                context: "Delete failed",
                status: 403,
            });
        }

        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(ApiError::Request {
                context: "Delete failed",
                status: 404,
            });
        }
        Ok(())
    }
}
