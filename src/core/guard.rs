//! Route guard decisions
//!
//! Pure functions of the current [`AuthState`]; the UI re-evaluates them whenever the
//! state changes.

use crate::core::routes::AppRoute;
use crate::core::session::{AuthState, Role};

/// What a protected route should do right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Startup session check still running
    Loading,
    RedirectToLogin,
    /// Signed in, but the role is not allowed here
    RedirectHome,
    Render,
}

impl GuardDecision {
    /// Where to navigate, if anywhere
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            GuardDecision::RedirectToLogin => Some(AppRoute::Login.path()),
            GuardDecision::RedirectHome => Some(AppRoute::Landing.path()),
            GuardDecision::Loading | GuardDecision::Render => None,
        }
    }
}

/// Decide a protected view. An empty `allowed_roles` admits any signed-in role.
pub fn decide(state: &AuthState, allowed_roles: &[Role]) -> GuardDecision {
    match state {
        AuthState::Unknown => GuardDecision::Loading,
        AuthState::Unauthenticated => GuardDecision::RedirectToLogin,
        AuthState::Authenticated(user) => {
            if allowed_roles.is_empty() || allowed_roles.contains(&user.role) {
                GuardDecision::Render
            } else {
                GuardDecision::RedirectHome
            }
        }
    }
}

/// What a signed-out-only view (login, register) should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicDecision {
    Render,
    RedirectDashboard,
}

impl PublicDecision {
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            PublicDecision::RedirectDashboard => Some(AppRoute::Dashboard.path()),
            PublicDecision::Render => None,
        }
    }
}

/// Signed-in users never see the login or registration forms
pub fn decide_public_only(state: &AuthState) -> PublicDecision {
    if state.is_authenticated() {
        PublicDecision::RedirectDashboard
    } else {
        PublicDecision::Render
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::sample_user;

    fn signed_in(role: Role) -> AuthState {
        AuthState::Authenticated(sample_user(role))
    }

    #[test]
    fn test_unknown_state_waits() {
        assert_eq!(decide(&AuthState::Unknown, &[]), GuardDecision::Loading);
        assert_eq!(decide(&AuthState::Unknown, &[Role::Recruiter]), GuardDecision::Loading);
        assert_eq!(GuardDecision::Loading.redirect_target(), None);
    }

    #[test]
    fn test_unauthenticated_goes_to_login() {
        let decision = decide(&AuthState::Unauthenticated, &[Role::Freelancer]);

        assert_eq!(decision, GuardDecision::RedirectToLogin);
        assert_eq!(decision.redirect_target(), Some("/login"));
    }

    #[test]
    fn test_wrong_role_goes_home() {
        let decision = decide(&signed_in(Role::Freelancer), &[Role::Recruiter]);

        assert_eq!(decision, GuardDecision::RedirectHome);
        assert_eq!(decision.redirect_target(), Some("/"));
    }

    #[test]
    fn test_empty_role_set_admits_any_role() {
        assert_eq!(decide(&signed_in(Role::Freelancer), &[]), GuardDecision::Render);
        assert_eq!(decide(&signed_in(Role::Recruiter), &[]), GuardDecision::Render);
    }

    #[test]
    fn test_matching_role_renders() {
        assert_eq!(
            decide(&signed_in(Role::Recruiter), &[Role::Freelancer, Role::Recruiter]),
            GuardDecision::Render
        );
    }

    #[test]
    fn test_public_only_redirects_signed_in_users() {
        assert_eq!(
            decide_public_only(&signed_in(Role::Freelancer)),
            PublicDecision::RedirectDashboard
        );
        assert_eq!(
            PublicDecision::RedirectDashboard.redirect_target(),
            Some("/dashboard")
        );
        assert_eq!(decide_public_only(&AuthState::Unauthenticated), PublicDecision::Render);
        assert_eq!(decide_public_only(&AuthState::Unknown), PublicDecision::Render);
    }

    #[test]
    fn test_route_table_roles() {
        let recruiter = signed_in(Role::Recruiter);

        assert_eq!(
            decide(&recruiter, AppRoute::ManageJobs.allowed_roles()),
            GuardDecision::Render
        );
        assert_eq!(
            decide(&recruiter, AppRoute::MyApplications.allowed_roles()),
            GuardDecision::RedirectHome
        );
        assert_eq!(
            decide(&AuthState::Unauthenticated, AppRoute::Profile.allowed_roles()),
            GuardDecision::RedirectToLogin
        );
    }
}
