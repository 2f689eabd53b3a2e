//! Leave request read model (owned by the HR backend, consumed read-only).

use serde::{Deserialize, Serialize};

use crate::LeaveRequestId;

/// Status value of a leave request still awaiting a decision.
pub const PENDING_STATUS: &str = "Pending";

/// Leave request as returned by `GET /api/leave-requests`.
///
/// Only `status` decides whether a request is pending. The rest is display
/// data and may be missing or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(default, deserialize_with = "crate::id::lenient")]
    pub id: Option<LeaveRequestId>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub leave_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl LeaveRequest {
    /// A missing or `null` status is never pending.
    pub fn is_pending(&self) -> bool {
        self.status.as_deref() == Some(PENDING_STATUS)
    }
}

/// Keep only pending requests, preserving backend order.
pub fn pending_only(requests: Vec<LeaveRequest>) -> Vec<LeaveRequest> {
    requests.into_iter().filter(LeaveRequest::is_pending).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_payload() {
        let json = r#"{
            "id": 3,
            "employeeName": "Meera",
            "leaveType": "Sick",
            "startDate": "2026-10-01",
            "status": "Pending"
        }"#;
        let req: LeaveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.employee_name.as_deref(), Some("Meera"));
        assert_eq!(req.leave_type.as_deref(), Some("Sick"));
        assert!(req.is_pending());
    }

    #[test]
    fn pending_filter_is_case_sensitive_and_ordered() {
        let json = r#"[
            {"id": "a", "status": "Pending"},
            {"id": "b", "status": "Approved"},
            {"id": "c", "status": "pending"},
            {"id": "d", "status": "Pending"}
        ]"#;
        let all: Vec<LeaveRequest> = serde_json::from_str(json).unwrap();
        let pending = pending_only(all);
        let ids: Vec<&str> = pending
            .iter()
            .filter_map(|r| r.id.as_ref())
            .map(LeaveRequestId::as_str)
            .collect();
        assert_eq!(ids, vec!["a", "d"]);
    }

    #[test]
    fn null_fields_decode_and_null_status_is_not_pending() {
        let json = r#"[
            {"id": 1, "employeeName": null, "leaveType": null, "status": "Pending"},
            {"employeeName": "Arjun", "status": null},
            {"startDate": "2026-10-01"}
        ]"#;
        let all: Vec<LeaveRequest> = serde_json::from_str(json).unwrap();
        assert_eq!(all.len(), 3);
        let pending = pending_only(all);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].employee_name, None);
    }
}
