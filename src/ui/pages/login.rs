//! Login page component

use leptos::prelude::*;

use crate::ui::auth::{LoginForm, use_auth_context};
use crate::ui::notifications::use_toasts;

/// Login page. Mounted behind `PublicOnly`, which moves a signed-in user to the dashboard.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth_context();
    let toasts = use_toasts();

    let on_success = move |_| {
        if let Some(user) = auth.user() {
            toasts.success("Signed in", format!("Welcome back, {}", user.display_name()));
        }
    };

    view! {
        <main class="auth-page">
            <div class="card auth-card">
                <LoginForm on_success=Callback::new(on_success) />
            </div>
        </main>
    }
}
