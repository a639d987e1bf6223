//! Register page component

use leptos::prelude::*;

use crate::ui::auth::{RegisterForm, use_auth_context};
use crate::ui::notifications::use_toasts;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth_context();
    let toasts = use_toasts();

    let on_success = move |_| {
        if let Some(role) = auth.role() {
            toasts.success(
                "Account created",
                format!("You're signed in as a {}", role.display_name().to_lowercase()),
            );
        }
    };

    view! {
        <main class="auth-page">
            <div class="card auth-card">
                <RegisterForm on_success=Callback::new(on_success) />
            </div>
        </main>
    }
}
