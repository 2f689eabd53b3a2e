//! `hrms-auth` - pure authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it validates
//! login input, models roles and sessions, and decides where a signed-in user
//! lands. Transport and persistence live in `hrms-client`.

pub mod credentials;
pub mod roles;
pub mod route;
pub mod session;

pub use credentials::{Credentials, FieldErrors, MIN_PASSWORD_LEN};
pub use roles::{Role, RoleSet};
pub use route::{Route, landing_route};
pub use session::{Session, SessionError};
