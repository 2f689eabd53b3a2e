//! Authenticated session model.
//!
//! # Invariants
//! - An account session always has a non-empty token and at least one role.
//! - An employee session always has an employee id and an email; its token may
//!   be empty because the employee login endpoint does not always issue one.
//! - There is no partially populated session: either one of the two variants
//!   exists in full, or there is no session at all.

use hrms_core::EmployeeId;
use serde_json::Value;
use thiserror::Error;

use crate::{RoleSet, Route, landing_route};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session token is missing")]
    MissingToken,

    #[error("session has no roles")]
    MissingRoles,

    #[error("employee session has no employee id")]
    MissingEmployeeId,

    #[error("employee session has no email")]
    MissingEmail,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    /// Role-bearing account from the standard login endpoint.
    Account {
        token: String,
        email: String,
        roles: RoleSet,
    },
    /// Employee identity from the employee login endpoint.
    Employee {
        token: String,
        email: String,
        employee_id: EmployeeId,
        profile: Option<Value>,
    },
}

impl Session {
    pub fn account(
        token: impl Into<String>,
        email: impl Into<String>,
        roles: RoleSet,
    ) -> Result<Self, SessionError> {
        let token = token.into();
        if token.is_empty() {
            return Err(SessionError::MissingToken);
        }
        if roles.is_empty() {
            return Err(SessionError::MissingRoles);
        }
        Ok(Session::Account {
            token,
            email: email.into(),
            roles,
        })
    }

    pub fn employee(
        token: impl Into<String>,
        email: impl Into<String>,
        employee_id: EmployeeId,
        profile: Option<Value>,
    ) -> Result<Self, SessionError> {
        let email = email.into();
        if email.is_empty() {
            return Err(SessionError::MissingEmail);
        }
        if employee_id.as_str().is_empty() {
            return Err(SessionError::MissingEmployeeId);
        }
        Ok(Session::Employee {
            token: token.into(),
            email,
            employee_id,
            profile,
        })
    }

    pub fn token(&self) -> &str {
        match self {
            Session::Account { token, .. } | Session::Employee { token, .. } => token,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Session::Account { email, .. } | Session::Employee { email, .. } => email,
        }
    }

    pub fn roles(&self) -> Option<&RoleSet> {
        match self {
            Session::Account { roles, .. } => Some(roles),
            Session::Employee { .. } => None,
        }
    }

    pub fn employee_id(&self) -> Option<&EmployeeId> {
        match self {
            Session::Account { .. } => None,
            Session::Employee { employee_id, .. } => Some(employee_id),
        }
    }

    /// Where this session lands after login or restoration.
    pub fn landing_route(&self) -> Route {
        match self {
            Session::Account { roles, .. } => landing_route(roles),
            Session::Employee { .. } => Route::Employee,
        }
    }
}
