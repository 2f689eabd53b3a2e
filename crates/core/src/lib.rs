//! `hrms-core` - domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no HTTP, no storage): the
//! error model, identifiers, and the externally owned read models the HR
//! dashboard consumes.

pub mod employee;
pub mod error;
pub mod id;
pub mod leave;

pub use employee::Employee;
pub use error::{DomainError, DomainResult};
pub use id::{EmployeeId, LeaveRequestId};
pub use leave::LeaveRequest;
