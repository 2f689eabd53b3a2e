//! Navigation targets and role precedence.

use serde::{Deserialize, Serialize};

use crate::{Role, RoleSet};

/// A navigation target inside the HRMS client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Admin,
    Store,
    Hr,
    User,
    Employee,
    /// Fallback landing area for accounts without a recognised role.
    Dashboard,
    Login,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Admin => "/admin",
            Route::Store => "/store",
            Route::Hr => "/hr",
            Route::User => "/user",
            Route::Employee => "/employee",
            Route::Dashboard => "/dashboard",
            Route::Login => "/login",
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

/// Landing roles, highest priority first.
pub const LANDING_PRECEDENCE: [(Role, Route); 4] = [
    (Role::ADMIN, Route::Admin),
    (Role::STORE, Route::Store),
    (Role::HR, Route::Hr),
    (Role::USER, Route::User),
];

/// Pick the single landing route for a multi-role account.
///
/// The first role of [`LANDING_PRECEDENCE`] present in `roles` wins, no matter
/// where it appears in the set. Accounts holding none of them land on
/// [`Route::Dashboard`].
pub fn landing_route(roles: &RoleSet) -> Route {
    LANDING_PRECEDENCE
        .iter()
        .find(|(role, _)| roles.contains(role))
        .map_or(Route::Dashboard, |(_, route)| *route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hr_precedes_user() {
        assert_eq!(landing_route(&RoleSet::parse("HR,USER")), Route::Hr);
        assert_eq!(landing_route(&RoleSet::parse("USER,HR")), Route::Hr);
    }

    #[test]
    fn unknown_roles_land_on_dashboard() {
        assert_eq!(landing_route(&RoleSet::parse("FINANCE,AUDITOR")), Route::Dashboard);
        assert_eq!(landing_route(&RoleSet::new()), Route::Dashboard);
    }

    #[test]
    fn paths_match_navigation_targets() {
        assert_eq!(Route::Admin.path(), "/admin");
        assert_eq!(Route::Login.to_string(), "/login");
    }

    fn extra_role() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("ADMIN".to_string()),
            Just("STORE".to_string()),
            Just("HR".to_string()),
            Just("USER".to_string()),
            "[A-Z]{1,8}",
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: ADMIN anywhere in the list always lands on /admin.
        #[test]
        fn admin_always_wins(
            others in prop::collection::vec(extra_role(), 0..6),
            position in 0usize..6
        ) {
            let mut names = others.clone();
            let at = position.min(names.len());
            names.insert(at, "ADMIN".to_string());
            let roles: RoleSet = names.into_iter().collect();
            prop_assert_eq!(landing_route(&roles), Route::Admin);
        }

        /// Property: the route equals the highest-priority landing role present.
        #[test]
        fn highest_priority_role_decides(
            names in prop::collection::vec(extra_role(), 0..8)
        ) {
            let roles: RoleSet = names.iter().cloned().collect();
            let has = |n: &str| names.iter().any(|r| r == n);
            let expected = if has("ADMIN") {
                Route::Admin
            } else if has("STORE") {
                Route::Store
            } else if has("HR") {
                Route::Hr
            } else if has("USER") {
                Route::User
            } else {
                Route::Dashboard
            };
            prop_assert_eq!(landing_route(&roles), expected);
        }
    }
}
