//! HR dashboard shell: header, notification bell, welcome banner, sidebar.
//!
//! The shell issues its two reads independently when loaded. Each one either
//! succeeds as a whole or degrades its own widget:
//! - leave requests failing leaves the bell empty with a zero count;
//! - the employee list failing shows `N/A` instead of a head count.
//!
//! Replies that arrive after [`DashboardShell::unmount`] are dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Local, NaiveDateTime, Timelike};
use hrms_auth::Route;
use hrms_core::employee::count_active;
use hrms_core::leave::pending_only;
use hrms_core::{Employee, LeaveRequest};

use crate::api::{ApiClient, ApiError};
use crate::authenticator::Authenticator;

pub const LEAVES_PAGE_PATH: &str = "/hr/leaves";

/// Head count widget in the welcome banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveEmployees {
    Loading,
    Count(usize),
    Unavailable,
}

impl core::fmt::Display for ActiveEmployees {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ActiveEmployees::Loading => f.write_str("..."),
            ActiveEmployees::Count(n) => write!(f, "{n}"),
            ActiveEmployees::Unavailable => f.write_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Greeting::Morning,
            12..=17 => Greeting::Afternoon,
            _ => Greeting::Evening,
        }
    }
}

impl core::fmt::Display for Greeting {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Greeting::Morning => "Good morning",
            Greeting::Afternoon => "Good afternoon",
            Greeting::Evening => "Good evening",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub path: &'static str,
}

pub const SIDEBAR: [NavItem; 8] = [
    NavItem { id: "dashboard", label: "Dashboard", path: "/hr" },
    NavItem { id: "documents", label: "Document Vault", path: "/hr/documents" },
    NavItem { id: "assets", label: "Asset Tracker", path: "/hr/assets" },
    NavItem { id: "leave", label: "Leave Management", path: "/hr/leaves" },
    NavItem { id: "performance", label: "Performance Plus", path: "/hr/performance" },
    NavItem { id: "onboarding", label: "Smart Onboarding", path: "/hr/joining" },
    NavItem { id: "activities", label: "Activity Stream", path: "/hr/activities" },
    NavItem { id: "training", label: "Training and Development", path: "/hr/training" },
];

/// Pending leave requests behind the header bell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationBell {
    pub pending: Vec<LeaveRequest>,
}

impl NotificationBell {
    pub fn unread_count(&self) -> usize {
        self.pending.len()
    }
}

/// Everything the shell renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    pub user_email: Option<String>,
    pub greeting: Greeting,
    pub today: String,
    pub bell: NotificationBell,
    pub active_employees: ActiveEmployees,
}

impl DashboardState {
    pub fn new(now: NaiveDateTime, user_email: Option<String>) -> Self {
        Self {
            user_email,
            greeting: Greeting::for_hour(now.hour()),
            today: now.format("%A, %B %-d, %Y").to_string(),
            bell: NotificationBell::default(),
            active_employees: ActiveEmployees::Loading,
        }
    }
}

impl core::fmt::Display for DashboardState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "HR Manager | Enterprise Workforce Management")?;
        if let Some(email) = &self.user_email {
            writeln!(f, "Signed in as {email}")?;
        }
        writeln!(f)?;
        writeln!(f, "Hello, {}!", self.greeting)?;
        writeln!(f, "Here's what's happening with your team today.")?;
        writeln!(
            f,
            "Today: {} | Active Employees: {}",
            self.today, self.active_employees
        )?;
        writeln!(f)?;

        writeln!(f, "Leave Requests ({} pending)", self.bell.unread_count())?;
        if self.bell.pending.is_empty() {
            writeln!(f, "  No pending leave requests")?;
        } else {
            for req in &self.bell.pending {
                writeln!(
                    f,
                    "  - {} | {} | Start: {} | {}",
                    shown(&req.employee_name),
                    shown(&req.leave_type),
                    shown(&req.start_date),
                    shown(&req.status)
                )?;
            }
            writeln!(f, "  View all leave requests: {LEAVES_PAGE_PATH}")?;
        }
        writeln!(f)?;

        writeln!(f, "Navigation")?;
        for item in &SIDEBAR {
            writeln!(f, "  {:<26} {}", item.label, item.path)?;
        }
        Ok(())
    }
}

fn shown(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("-")
}

/// Handle to a mounted dashboard. Clones share the same view.
#[derive(Debug, Clone)]
pub struct DashboardShell {
    state: Arc<Mutex<DashboardState>>,
    mounted: Arc<AtomicBool>,
}

impl DashboardShell {
    pub fn mount(user_email: Option<String>) -> Self {
        Self::mount_at(Local::now().naive_local(), user_email)
    }

    pub fn mount_at(now: NaiveDateTime, user_email: Option<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(DashboardState::new(now, user_email))),
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Tear the view down; later replies are ignored.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }

    /// Issue both reads concurrently, applying each reply as it lands.
    pub async fn load(&self, api: &ApiClient) {
        tokio::join!(
            async { self.apply_leave_requests(api.leave_requests().await) },
            async { self.apply_employees(api.employees().await) },
        );
    }

    /// Header logout: tear down the view, then end the session.
    pub async fn logout(&self, auth: &Authenticator) -> Route {
        self.unmount();
        auth.logout().await
    }

    fn update(&self, what: &str, apply: impl FnOnce(&mut DashboardState)) {
        if !self.is_mounted() {
            tracing::debug!(what, "dashboard unmounted; dropping late reply");
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        apply(&mut *state);
    }

    fn apply_leave_requests(&self, result: Result<Vec<LeaveRequest>, ApiError>) {
        let pending = match result {
            Ok(all) => pending_only(all),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load leave requests");
                Vec::new()
            }
        };
        self.update("leave requests", |state| {
            state.bell = NotificationBell { pending };
        });
    }

    fn apply_employees(&self, result: Result<Vec<Employee>, ApiError>) {
        let active = match result {
            Ok(all) => ActiveEmployees::Count(count_active(&all)),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load employees");
                ActiveEmployees::Unavailable
            }
        };
        self.update("employees", |state| {
            state.active_employees = active;
        });
    }
}
