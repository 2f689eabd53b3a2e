//! `hrms-client`
//!
//! **Responsibility:** HR management client: login, session persistence and
//! the HR dashboard shell.
//!
//! This crate provides:
//! - `Authenticator`: form validation, the two login paths, role-based landing,
//!   session restoration and logout
//! - `SessionStore`: typed session persistence over in-memory or SQLite storage
//! - `ApiClient`: HTTP access to the HR API, optionally carrying a bearer token
//! - `DashboardShell`: pending-leave bell and active head count

pub mod api;
pub mod authenticator;
pub mod config;
pub mod dashboard;
pub mod notify;
pub mod session_store;
pub mod storage;

pub use api::{ApiClient, ApiError, LoginEndpoint};
pub use authenticator::{Authenticator, LoginError};
pub use config::ClientConfig;
pub use dashboard::{ActiveEmployees, DashboardShell, DashboardState};
pub use notify::{Toast, ToastKind, Toaster};
pub use session_store::SessionStore;
pub use storage::{MemoryStorage, SessionStorage, SqliteStorage, StorageError};
