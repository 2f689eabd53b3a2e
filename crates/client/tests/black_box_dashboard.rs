mod support;

use hrms_client::api::{EMPLOYEES_PATH, LEAVE_REQUESTS_PATH};
use hrms_client::{ActiveEmployees, ApiClient, DashboardShell};
use serde_json::json;

use support::{TestServer, closed_port_url};

fn leave_requests() -> serde_json::Value {
    json!([
        {"id": 1, "employeeName": "Meera", "leaveType": "Sick", "startDate": "2026-10-20", "status": "Pending"},
        {"id": 2, "employeeName": "Arjun", "leaveType": "Casual", "startDate": "2026-10-22", "status": "Approved"},
        {"id": 3, "employeeName": "Divya", "leaveType": "Earned", "startDate": "2026-11-02", "status": "Pending"}
    ])
}

fn employees() -> serde_json::Value {
    json!([
        {"id": 1, "name": "Meera", "status": "Active"},
        {"id": 2, "name": "Arjun"},
        {"id": 3, "name": "Divya", "status": "On Notice"},
        {"id": 4, "name": "Kiran", "status": "Active"}
    ])
}

#[tokio::test]
async fn loads_both_aggregates() {
    let server = TestServer::spawn().await;
    server.api.reply_json(LEAVE_REQUESTS_PATH, 200, leave_requests());
    server.api.reply_json(EMPLOYEES_PATH, 200, employees());

    let shell = DashboardShell::mount(Some("hr@x.com".to_string()));
    shell.load(&ApiClient::new(&server.base_url)).await;

    let state = shell.snapshot();
    assert_eq!(state.bell.unread_count(), 2);
    let names: Vec<&str> = state
        .bell
        .pending
        .iter()
        .filter_map(|r| r.employee_name.as_deref())
        .collect();
    assert_eq!(names, vec!["Meera", "Divya"]);
    assert_eq!(state.active_employees, ActiveEmployees::Count(3));

    // Unauthenticated client sends no credentials.
    assert!(server.api.hits().iter().all(|h| h.authorization.is_none()));
}

#[tokio::test]
async fn authenticated_client_sends_bearer_token() {
    let server = TestServer::spawn().await;
    server.api.reply_json(LEAVE_REQUESTS_PATH, 200, json!([]));
    server.api.reply_json(EMPLOYEES_PATH, 200, json!([]));

    let shell = DashboardShell::mount(None);
    shell
        .load(&ApiClient::with_token(&server.base_url, "t1"))
        .await;

    let hits = server.api.hits();
    assert_eq!(hits.len(), 2);
    assert!(
        hits.iter()
            .all(|h| h.authorization.as_deref() == Some("Bearer t1"))
    );
    assert_eq!(shell.snapshot().active_employees, ActiveEmployees::Count(0));
}

#[tokio::test]
async fn network_error_shows_not_available() {
    let shell = DashboardShell::mount(None);
    shell.load(&ApiClient::new(closed_port_url().await)).await;

    let state = shell.snapshot();
    assert_eq!(state.active_employees.to_string(), "N/A");
    assert!(state.bell.pending.is_empty());
    assert_eq!(state.bell.unread_count(), 0);
}

#[tokio::test]
async fn one_failing_widget_does_not_affect_the_other() {
    let server = TestServer::spawn().await;
    server.api.reply_json(LEAVE_REQUESTS_PATH, 200, leave_requests());
    server
        .api
        .reply_json(EMPLOYEES_PATH, 500, json!({"message": "boom"}));

    let shell = DashboardShell::mount(None);
    shell.load(&ApiClient::new(&server.base_url)).await;

    let state = shell.snapshot();
    assert_eq!(state.bell.unread_count(), 2);
    assert_eq!(state.active_employees, ActiveEmployees::Unavailable);
}

#[tokio::test]
async fn sparse_records_still_count() {
    let server = TestServer::spawn().await;
    server.api.reply_json(
        LEAVE_REQUESTS_PATH,
        200,
        json!([
            {"id": 1, "employeeName": null, "leaveType": "Sick", "status": "Pending"},
            {"id": 2, "employeeName": "Arjun", "status": null},
            {"employeeName": "Divya"}
        ]),
    );
    server.api.reply_json(
        EMPLOYEES_PATH,
        200,
        json!([
            {"id": 1, "name": null, "status": "Active"},
            {"id": 2, "name": "B"},
            {"name": "C", "status": null},
            {"id": "", "status": "Terminated"}
        ]),
    );

    let shell = DashboardShell::mount(None);
    shell.load(&ApiClient::new(&server.base_url)).await;

    let state = shell.snapshot();
    assert_eq!(state.bell.unread_count(), 1);
    assert_eq!(state.bell.pending[0].leave_type.as_deref(), Some("Sick"));
    assert_eq!(state.active_employees, ActiveEmployees::Count(3));
}

#[tokio::test]
async fn reply_that_is_not_a_list_degrades_its_widget() {
    let server = TestServer::spawn().await;
    server.api.reply_json(LEAVE_REQUESTS_PATH, 200, json!({"not": "a list"}));
    server.api.reply_raw(EMPLOYEES_PATH, 200, "<html>oops</html>");

    let shell = DashboardShell::mount(None);
    shell.load(&ApiClient::new(&server.base_url)).await;

    let state = shell.snapshot();
    assert_eq!(state.bell.unread_count(), 0);
    assert_eq!(state.active_employees, ActiveEmployees::Unavailable);
}

#[tokio::test]
async fn replies_after_unmount_are_dropped() {
    let server = TestServer::spawn().await;
    server.api.reply_json(LEAVE_REQUESTS_PATH, 200, leave_requests());
    server.api.reply_json(EMPLOYEES_PATH, 200, employees());

    let shell = DashboardShell::mount(None);
    shell.unmount();
    shell.load(&ApiClient::new(&server.base_url)).await;

    let state = shell.snapshot();
    assert_eq!(state.bell.unread_count(), 0);
    assert_eq!(state.active_employees, ActiveEmployees::Loading);
}
