//! Terminal entry point for the HRMS client.
//!
//! Restores the persisted session, or logs in with the credentials in
//! `HRMS_LOGIN_EMAIL` / `HRMS_LOGIN_PASSWORD` (`HRMS_LOGIN_AS_EMPLOYEE=1` for
//! the employee endpoint), then prints the landing route. HR users also get
//! the dashboard. `hrms-client logout` clears the session.

use std::process::ExitCode;
use std::sync::Arc;

use hrms_auth::{Credentials, Route};
use hrms_client::{
    ApiClient, Authenticator, ClientConfig, DashboardShell, LoginError, SessionStore, SqliteStorage,
};

#[tokio::main]
async fn main() -> ExitCode {
    hrms_observability::init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(api_url = %config.api_url, session_db = ?config.session_db, "starting HRMS client");

    let store = SessionStore::new(Arc::new(SqliteStorage::open(&config.session_db)));
    let auth = Authenticator::new(ApiClient::new(&config.api_url), store, Default::default());

    if std::env::args().nth(1).as_deref() == Some("logout") {
        println!("{}", auth.logout().await);
        return ExitCode::SUCCESS;
    }

    let route = match auth.restore().await {
        Some(route) => route,
        None => match login_from_env(&auth).await {
            Ok(route) => route,
            Err(err) => {
                report_login_error(&err);
                return ExitCode::FAILURE;
            }
        },
    };

    for toast in auth.toasts().drain() {
        eprintln!("{}", toast.message);
    }
    println!("{route}");

    if route == Route::Hr {
        let email = auth.current_session().await.map(|s| s.email().to_string());
        let shell = DashboardShell::mount(email);
        // The dashboard reads go out with the session's bearer token.
        let api = auth
            .client()
            .unwrap_or_else(|| ApiClient::new(&config.api_url));
        shell.load(&api).await;
        print!("{}", shell.snapshot());
    }

    ExitCode::SUCCESS
}

async fn login_from_env(auth: &Authenticator) -> Result<Route, LoginError> {
    let email = std::env::var("HRMS_LOGIN_EMAIL").unwrap_or_default();
    let password = std::env::var("HRMS_LOGIN_PASSWORD").unwrap_or_default();
    let as_employee = std::env::var("HRMS_LOGIN_AS_EMPLOYEE")
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false);

    auth.login(Credentials::new(email, password), as_employee).await
}

fn report_login_error(err: &LoginError) {
    match err {
        LoginError::Validation(fields) => {
            if let Some(msg) = &fields.email {
                eprintln!("email: {msg}");
            }
            if let Some(msg) = &fields.password {
                eprintln!("password: {msg}");
            }
        }
        other => eprintln!("{other}"),
    }
}
