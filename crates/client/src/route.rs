//! Client-side destinations and the access level each one requires.

use serde::{Deserialize, Serialize};

use retailinv_auth::{Access, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Unauthenticated entry point.
    Login,
    Register,
    /// Default landing page for any authenticated user.
    Dashboard,
    AdminDashboard,
    Stores,
    Users,
    Products,
    Inventory,
    Movements,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::AdminDashboard,
        Route::Stores,
        Route::Users,
        Route::Products,
        Route::Inventory,
        Route::Movements,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::AdminDashboard => "/admin",
            Route::Stores => "/admin/stores",
            Route::Users => "/admin/users",
            Route::Products => "/products",
            Route::Inventory => "/inventory",
            Route::Movements => "/inventory/movements",
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Login | Route::Register => Access::Public,
            Route::Dashboard | Route::Products | Route::Inventory => Access::Authenticated,
            Route::AdminDashboard | Route::Stores | Route::Users | Route::Movements => {
                Access::AdminOnly
            }
        }
    }

    /// Resolve a location path; query strings, fragments and a trailing
    /// slash are ignored.
    pub fn parse(location: &str) -> Option<Route> {
        let path = location
            .trim()
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Where a freshly authenticated user should land.
    pub fn landing_for(role: Option<Role>) -> Route {
        match role {
            Some(Role::Admin) => Route::AdminDashboard,
            Some(Role::Employee) | None => Route::Dashboard,
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_back_to_routes() {
        for route in Route::ALL {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
    }

    #[test]
    fn parse_ignores_trailing_slash_and_query() {
        assert_eq!(Route::parse("/admin/users/"), Some(Route::Users));
        assert_eq!(Route::parse("/inventory/movements?store=3"), Some(Route::Movements));
        assert_eq!(Route::parse(""), Some(Route::Login));
        assert_eq!(Route::parse("/nowhere"), None);
    }

    #[test]
    fn admin_screens_are_admin_only() {
        assert_eq!(Route::Stores.access(), Access::AdminOnly);
        assert_eq!(Route::Movements.access(), Access::AdminOnly);
        assert_eq!(Route::Inventory.access(), Access::Authenticated);
        assert_eq!(Route::Login.access(), Access::Public);
    }

    #[test]
    fn landing_depends_on_role() {
        assert_eq!(Route::landing_for(Some(Role::Admin)), Route::AdminDashboard);
        assert_eq!(Route::landing_for(Some(Role::Employee)), Route::Dashboard);
        assert_eq!(Route::landing_for(None), Route::Dashboard);
    }
}
