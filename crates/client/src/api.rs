//! HTTP bindings for the HR API.
//!
//! [`ApiClient`] is the one way the client talks to the backend. A client
//! built with a token sends `Authorization: Bearer <token>` on every request.
//! The authenticator hands that client out while a session is active.

use hrms_auth::{Credentials, RoleSet};
use hrms_core::{Employee, EmployeeId, LeaveRequest};
use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const ACCOUNT_LOGIN_PATH: &str = "/api/auth/login";
pub const EMPLOYEE_LOGIN_PATH: &str = "/api/employees/login";
pub const LEAVE_REQUESTS_PATH: &str = "/api/leave-requests";
pub const EMPLOYEES_PATH: &str = "/api/employees";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("<no message>"))]
    Api { status: u16, message: Option<String> },
    #[error("parse error: {0}")]
    Parse(String),
}

/// Which login endpoint a submission goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginEndpoint {
    Account,
    Employee,
}

impl LoginEndpoint {
    pub fn for_mode(as_employee: bool) -> Self {
        if as_employee {
            LoginEndpoint::Employee
        } else {
            LoginEndpoint::Account
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            LoginEndpoint::Account => ACCOUNT_LOGIN_PATH,
            LoginEndpoint::Employee => EMPLOYEE_LOGIN_PATH,
        }
    }
}

/// Body of a successful `POST /api/auth/login`.
///
/// Every field is optional on the wire; the authenticator decides which
/// omissions are fatal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountLoginReply {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Option<RoleSet>,
}

/// Body of a successful `POST /api/employees/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeLoginReply {
    #[serde(default)]
    pub id: Option<EmployeeId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub profile: Option<Value>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl core::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::new(base_url)
        }
    }

    /// A copy of this client that authenticates with `token`, sharing the
    /// underlying connection pool.
    pub fn authenticated(&self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let req = self.http.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send a request and decode a JSON success body.
    ///
    /// Non-2xx responses become [`ApiError::Api`], carrying the body's
    /// `message` field when the body is JSON and has one.
    async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let resp = req.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(self.request(Method::GET, path)).await
    }

    /// Post credentials to a login endpoint and return the raw JSON reply.
    pub async fn login(
        &self,
        endpoint: LoginEndpoint,
        credentials: &Credentials,
    ) -> Result<Value, ApiError> {
        let req = self
            .request(Method::POST, endpoint.path())
            .json(credentials);
        self.send_json(req).await
    }

    pub async fn leave_requests(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        self.get_json(LEAVE_REQUESTS_PATH).await
    }

    pub async fn employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.get_json(EMPLOYEES_PATH).await
    }
}

fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
