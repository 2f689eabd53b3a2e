//! Login, session restoration and logout.
//!
//! The authenticator owns the session lifecycle:
//! - a successful login persists the session in one batch and attaches an
//!   authenticated [`ApiClient`];
//! - any failure after validation clears the stored session and detaches the
//!   client;
//! - restoration and logout never touch the network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use hrms_auth::{Credentials, FieldErrors, Route, Session};
use serde_json::Value;
use thiserror::Error;

use crate::api::{AccountLoginReply, ApiClient, ApiError, EmployeeLoginReply, LoginEndpoint};
use crate::notify::Toaster;
use crate::session_store::SessionStore;
use crate::storage::StorageError;

/// Shown when the server rejects a login without saying why.
pub const LOGIN_REJECTED_FALLBACK: &str = "Login failed. Please check credentials.";
pub const LOGIN_RETRY_MESSAGE: &str = "Login failed. Please try again.";
pub const INVALID_EMPLOYEE_DATA: &str = "Invalid employee data received";
pub const INVALID_SERVER_RESPONSE: &str = "Invalid response from server";

/// Why a login attempt failed. `Display` is the user-facing message.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Form input rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] FieldErrors),

    /// Non-2xx reply; `message` comes from the body or the generic fallback.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 2xx reply missing required fields or not JSON at all.
    #[error("{0}")]
    InvalidResponse(&'static str),

    /// The request could not be sent or its body could not be read.
    #[error("Login failed. Please try again.")]
    Network(String),

    /// The session could not be persisted.
    #[error("Login failed. Please try again.")]
    Storage(#[source] StorageError),

    /// Another submission is still waiting for its reply.
    #[error("a login request is already in progress")]
    InFlight,
}

impl LoginError {
    fn from_api(endpoint: LoginEndpoint, err: ApiError) -> Self {
        match err {
            ApiError::Api { status, message } => LoginError::Http {
                status,
                message: message.unwrap_or_else(|| LOGIN_REJECTED_FALLBACK.to_string()),
            },
            ApiError::Network(detail) => LoginError::Network(detail),
            ApiError::Parse(_) => LoginError::InvalidResponse(invalid_reply_message(endpoint)),
        }
    }
}

fn invalid_reply_message(endpoint: LoginEndpoint) -> &'static str {
    match endpoint {
        LoginEndpoint::Employee => INVALID_EMPLOYEE_DATA,
        LoginEndpoint::Account => INVALID_SERVER_RESPONSE,
    }
}

/// Marks a login as in flight until dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug)]
pub struct Authenticator {
    api: ApiClient,
    store: SessionStore,
    toasts: Toaster,
    client: Mutex<Option<ApiClient>>,
    submitting: AtomicBool,
}

impl Authenticator {
    pub fn new(api: ApiClient, store: SessionStore, toasts: Toaster) -> Self {
        Self {
            api,
            store,
            toasts,
            client: Mutex::new(None),
            submitting: AtomicBool::new(false),
        }
    }

    /// Authenticated client for the current session, if one is attached.
    pub fn client(&self) -> Option<ApiClient> {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True while a login request is waiting for its reply; the submit
    /// control should be disabled meanwhile.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn toasts(&self) -> &Toaster {
        &self.toasts
    }

    /// The persisted session, if any. Storage failures read as "no session".
    pub async fn current_session(&self) -> Option<Session> {
        match self.store.load().await {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, "could not read persisted session");
                None
            }
        }
    }

    /// Resume a persisted account session without contacting the server.
    ///
    /// Only sessions carrying a token and roles are resumed; the landing route
    /// is recomputed from the stored roles.
    pub async fn restore(&self) -> Option<Route> {
        let session = self.current_session().await?;
        let Session::Account { .. } = &session else {
            return None;
        };

        self.attach(session.token());
        let route = session.landing_route();
        tracing::info!(route = %route, "restored persisted session");
        Some(route)
    }

    /// Submit the login form.
    ///
    /// Exactly one request is sent per accepted submission, to the employee
    /// endpoint when `as_employee` is set and to the account endpoint
    /// otherwise. Invalid input returns [`LoginError::Validation`] without a
    /// request and without touching the stored session.
    pub async fn login(
        &self,
        credentials: Credentials,
        as_employee: bool,
    ) -> Result<Route, LoginError> {
        let _guard = InFlightGuard::acquire(&self.submitting).ok_or(LoginError::InFlight)?;
        credentials.validate()?;

        let endpoint = LoginEndpoint::for_mode(as_employee);
        tracing::info!(endpoint = endpoint.path(), "submitting login");

        let outcome = match self.api.login(endpoint, &credentials).await {
            Ok(body) => self.establish(endpoint, &credentials, body).await,
            Err(err) => Err(LoginError::from_api(endpoint, err)),
        };

        if let Err(err) = &outcome {
            self.fail(err).await;
        }
        outcome
    }

    /// Drop the session and return to the login screen. Never fails.
    pub async fn logout(&self) -> Route {
        self.detach();
        if let Err(err) = self.store.clear().await {
            tracing::error!(error = %err, "failed to clear persisted session on logout");
        }
        tracing::info!("logged out");
        Route::Login
    }

    async fn establish(
        &self,
        endpoint: LoginEndpoint,
        credentials: &Credentials,
        body: Value,
    ) -> Result<Route, LoginError> {
        let session = match endpoint {
            LoginEndpoint::Employee => employee_session(body)?,
            LoginEndpoint::Account => account_session(body, &credentials.email)?,
        };

        self.store
            .replace(&session)
            .await
            .map_err(LoginError::Storage)?;
        self.attach(session.token());

        self.toasts.success(match endpoint {
            LoginEndpoint::Employee => "Employee login successful!",
            LoginEndpoint::Account => "Login successful!",
        });

        let route = session.landing_route();
        tracing::info!(route = %route, "login succeeded");
        Ok(route)
    }

    async fn fail(&self, err: &LoginError) {
        match err {
            LoginError::Network(detail) => {
                tracing::error!(%detail, "login request failed");
            }
            LoginError::Storage(source) => {
                tracing::error!(error = %source, "failed to persist session");
            }
            other => tracing::warn!(error = %other, "login rejected"),
        }

        self.detach();
        if let Err(clear_err) = self.store.clear().await {
            tracing::error!(error = %clear_err, "failed to clear session after failed login");
        }
        self.toasts.error(err.to_string());
    }

    fn attach(&self, token: &str) {
        *self.client.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(self.api.authenticated(token));
    }

    fn detach(&self) {
        self.client.lock().unwrap_or_else(PoisonError::into_inner).take();
    }
}

fn employee_session(body: Value) -> Result<Session, LoginError> {
    let invalid = || LoginError::InvalidResponse(INVALID_EMPLOYEE_DATA);
    let reply: EmployeeLoginReply = serde_json::from_value(body).map_err(|_| invalid())?;

    let (Some(employee_id), Some(email)) = (reply.id, reply.email.filter(|e| !e.is_empty()))
    else {
        return Err(invalid());
    };

    Session::employee(
        reply.token.unwrap_or_default(),
        email,
        employee_id,
        reply.profile.filter(|p| !p.is_null()),
    )
    .map_err(|_| invalid())
}

fn account_session(body: Value, submitted_email: &str) -> Result<Session, LoginError> {
    let invalid = || LoginError::InvalidResponse(INVALID_SERVER_RESPONSE);
    let reply: AccountLoginReply = serde_json::from_value(body).map_err(|_| invalid())?;

    let token = reply.token.filter(|t| !t.is_empty()).ok_or_else(invalid)?;
    let roles = reply.roles.filter(|r| !r.is_empty()).ok_or_else(invalid)?;
    let email = reply
        .email
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| submitted_email.to_string());

    Session::account(token, email, roles).map_err(|_| invalid())
}
