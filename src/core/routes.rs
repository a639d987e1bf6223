//! Application route table
//!
//! Every screen path and the access rule it is mounted with live here, so the router,
//! the guard and the navigation bar agree on them.

use crate::core::session::Role;

/// Who may see a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone
    Public,
    /// Only signed-out visitors; signed-in users are sent to the dashboard
    PublicOnly,
    /// Signed-in users whose role is in the set. An empty set admits every role.
    Authenticated(&'static [Role]),
}

const ANY_ROLE: &[Role] = &[];
const EVERY_ROLE: &[Role] = &Role::ALL;
const FREELANCER_ONLY: &[Role] = &[Role::Freelancer];
const RECRUITER_ONLY: &[Role] = &[Role::Recruiter];

/// Screens of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Landing,
    Login,
    Register,
    Dashboard,
    Profile,
    MyApplications,
    ManageJobs,
}

impl AppRoute {
    pub const ALL: [AppRoute; 7] = [
        AppRoute::Landing,
        AppRoute::Login,
        AppRoute::Register,
        AppRoute::Dashboard,
        AppRoute::Profile,
        AppRoute::MyApplications,
        AppRoute::ManageJobs,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            AppRoute::Landing => "/",
            AppRoute::Login => "/login",
            AppRoute::Register => "/register",
            AppRoute::Dashboard => "/dashboard",
            AppRoute::Profile => "/profile",
            AppRoute::MyApplications => "/my-applications",
            AppRoute::ManageJobs => "/manage-jobs",
        }
    }

    /// Path without the leading slash, as the router matches it
    pub fn segment(&self) -> &'static str {
        self.path().trim_start_matches('/')
    }

    /// Roles admitted by an authenticated route; empty for everything else
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self.access() {
            Access::Authenticated(roles) => roles,
            Access::Public | Access::PublicOnly => ANY_ROLE,
        }
    }

    pub fn access(&self) -> Access {
        match self {
            AppRoute::Landing => Access::Public,
            AppRoute::Login | AppRoute::Register => Access::PublicOnly,
            AppRoute::Dashboard => Access::Authenticated(EVERY_ROLE),
            AppRoute::Profile => Access::Authenticated(ANY_ROLE),
            AppRoute::MyApplications => Access::Authenticated(FREELANCER_ONLY),
            AppRoute::ManageJobs => Access::Authenticated(RECRUITER_ONLY),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppRoute::Landing => "Home",
            AppRoute::Login => "Login",
            AppRoute::Register => "Register",
            AppRoute::Dashboard => "Dashboard",
            AppRoute::Profile => "Profile",
            AppRoute::MyApplications => "My Applications",
            AppRoute::ManageJobs => "Manage Jobs",
        }
    }

    /// Whether a signed-in user with `role` may open this route
    pub fn allows(&self, role: Role) -> bool {
        match self.access() {
            Access::Public => true,
            Access::PublicOnly => false,
            Access::Authenticated(roles) => roles.is_empty() || roles.contains(&role),
        }
    }

    /// Links shown in the navigation bar for a signed-in user
    pub fn nav_links(role: Role) -> Vec<AppRoute> {
        Self::ALL
            .into_iter()
            .filter(|route| matches!(route.access(), Access::Authenticated(_)))
            .filter(|route| route.allows(role))
            .collect()
    }
}
