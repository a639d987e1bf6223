//! Route guard components
//!
//! Both re-evaluate their decision whenever the auth state changes and navigate with
//! `replace` so the guarded URL does not stay in history.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::context::use_auth_context;
use crate::core::guard::{GuardDecision, PublicDecision, decide, decide_public_only};
use crate::core::session::Role;
use crate::ui::common::LoadingScreen;

fn replace_history() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..Default::default()
    }
}

/// Renders `children` only for signed-in users whose role is allowed.
/// An empty `roles` admits every role.
#[component]
pub fn ProtectedRoute(
    #[prop(default = &[])] roles: &'static [Role],
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| auth.state.with(|state| decide(state, roles)));

    Effect::new(move |_| {
        if let Some(target) = decision.get().redirect_target() {
            leptos::logging::log!("Guard redirect to {}", target);
            navigate(target, replace_history());
        }
    });

    move || match decision.get() {
        GuardDecision::Loading => view! { <LoadingScreen /> }.into_any(),
        GuardDecision::Render => children().into_any(),
        GuardDecision::RedirectToLogin | GuardDecision::RedirectHome => ().into_any(),
    }
}

/// Renders `children` for signed-out visitors; signed-in users go to the dashboard.
#[component]
pub fn PublicOnly(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| auth.state.with(decide_public_only));

    Effect::new(move |_| {
        if let Some(target) = decision.get().redirect_target() {
            navigate(target, replace_history());
        }
    });

    move || match decision.get() {
        PublicDecision::Render => children().into_any(),
        PublicDecision::RedirectDashboard => ().into_any(),
    }
}

/// Follows the redirect requested when a session expires mid-request
#[component]
pub fn SessionRedirect() -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if let Some(target) = auth.pending_redirect.get() {
            auth.pending_redirect.set(None);
            navigate(&target, replace_history());
        }
    });
}
