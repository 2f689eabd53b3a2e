//! Typed session persistence on top of a [`SessionStorage`] backend.
//!
//! Persisted layout (one entry per key):
//!
//! | key               | value                              |
//! |-------------------|------------------------------------|
//! | `token`           | bearer token (may be empty for employees) |
//! | `userEmail`       | signed-in email                    |
//! | `roles`           | comma-joined role list             |
//! | `employeeId`      | employee identifier                |
//! | `employeeProfile` | JSON-encoded employee profile      |

use std::collections::BTreeMap;
use std::sync::Arc;

use hrms_auth::{RoleSet, Session};
use hrms_core::EmployeeId;

use crate::storage::{SessionStorage, StorageError, WriteBatch};

pub const KEY_TOKEN: &str = "token";
pub const KEY_USER_EMAIL: &str = "userEmail";
pub const KEY_ROLES: &str = "roles";
pub const KEY_EMPLOYEE_ID: &str = "employeeId";
pub const KEY_EMPLOYEE_PROFILE: &str = "employeeProfile";

/// Every key a session may occupy.
pub const SESSION_KEYS: [&str; 5] = [
    KEY_TOKEN,
    KEY_USER_EMAIL,
    KEY_ROLES,
    KEY_EMPLOYEE_ID,
    KEY_EMPLOYEE_PROFILE,
];

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl core::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Load the persisted session, if a complete one exists.
    ///
    /// An account session needs a non-empty token and at least one role; an
    /// employee session needs an employee id and an email. Anything less is
    /// treated as no session at all.
    pub async fn load(&self) -> Result<Option<Session>, StorageError> {
        let entries = self.storage.load(&SESSION_KEYS).await?;
        Ok(decode(&entries))
    }

    /// Replace whatever is stored with `session`, in one atomic batch.
    pub async fn replace(&self, session: &Session) -> Result<(), StorageError> {
        self.storage.apply(encode(session)).await
    }

    /// Remove every session key.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.storage.apply(clear_batch()).await
    }
}

fn clear_batch() -> WriteBatch {
    SESSION_KEYS
        .iter()
        .fold(WriteBatch::new(), |batch, key| batch.remove(*key))
}

fn encode(session: &Session) -> WriteBatch {
    let batch = clear_batch()
        .set(KEY_TOKEN, session.token())
        .set(KEY_USER_EMAIL, session.email());

    match session {
        Session::Account { roles, .. } => batch.set(KEY_ROLES, roles.to_joined()),
        Session::Employee {
            employee_id,
            profile,
            ..
        } => {
            let batch = batch.set(KEY_EMPLOYEE_ID, employee_id.as_str());
            match profile {
                Some(profile) => batch.set(KEY_EMPLOYEE_PROFILE, profile.to_string()),
                None => batch,
            }
        }
    }
}

fn decode(entries: &BTreeMap<String, String>) -> Option<Session> {
    let get = |key: &str| entries.get(key).map(String::as_str);
    let token = get(KEY_TOKEN).unwrap_or_default();
    let email = get(KEY_USER_EMAIL).unwrap_or_default();

    if let Some(roles) = get(KEY_ROLES) {
        return Session::account(token, email, RoleSet::parse(roles)).ok();
    }

    let employee_id = EmployeeId::new(get(KEY_EMPLOYEE_ID)?).ok()?;
    let profile = get(KEY_EMPLOYEE_PROFILE).and_then(|raw| {
        serde_json::from_str(raw)
            .map_err(|err| tracing::warn!(error = %err, "discarding unreadable employee profile"))
            .ok()
    });
    Session::employee(token, email, employee_id, profile).ok()
}
