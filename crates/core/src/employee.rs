//! Employee read model (owned by the HR backend, consumed read-only).
//!
//! Only `status` feeds the head count. Every other field is optional so a
//! sparse or `null`-laden record never fails the list it arrives in.

use serde::{Deserialize, Serialize};

use crate::EmployeeId;

/// Status value the backend uses for employees currently on the payroll.
pub const ACTIVE_STATUS: &str = "Active";

/// Employee record as returned by `GET /api/employees`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, deserialize_with = "crate::id::lenient")]
    pub id: Option<EmployeeId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Employee {
    /// An employee with no recorded status counts as active.
    pub fn is_active(&self) -> bool {
        match self.status.as_deref() {
            None => true,
            Some(status) => status == ACTIVE_STATUS,
        }
    }
}

/// Number of active employees in a list.
pub fn count_active(employees: &[Employee]) -> usize {
    employees.iter().filter(|e| e.is_active()).count()
}
