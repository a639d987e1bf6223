//! Login form component
//!
//! Email and password sign-in. Fields are checked locally before the request is sent;
//! server-side failures show up through the auth context error.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::core::routes::AppRoute;
use crate::core::session::Credentials;
use crate::core::validation::ValidationError;
use crate::ui::common::{ErrorMessage, FormField, InlineSpinner, field_error};
use crate::ui::icon::{Icon, icons};

/// Login form component
#[component]
pub fn LoginForm(
    /// Callback when login is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let invalid = RwSignal::new(None::<ValidationError>);

    let password_error = field_error(invalid, "password");
    let clear_errors = Callback::new(move |_| {
        invalid.set(None);
        auth.clear_error();
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        auth.clear_error();

        let credentials = Credentials::new(email.get().trim(), password.get());
        if let Err(err) = credentials.validate() {
            invalid.set(Some(err));
            return;
        }
        invalid.set(None);

        spawn_local(async move {
            // Failures are already reflected in `auth.error`
            if auth.login(credentials).await.is_ok() {
                if let Some(callback) = on_success {
                    callback.run(());
                }
            }
        });
    };

    view! {
        <form on:submit=on_submit class="auth-form" novalidate>
            <div class="auth-form-header">
                <h2>"Welcome back"</h2>
                <p>"Sign in to your account to continue"</p>
            </div>

            <ErrorMessage error=auth.error />

            <FormField
                label="Email"
                name="email"
                input_type="email"
                autocomplete="email"
                placeholder="you@example.com"
                required=true
                value=email
                error=field_error(invalid, "email")
                on_edit=clear_errors
            />

            <div class="field">
                <label class="label" for="password">
                    "Password"
                    <span class="required-mark">"*"</span>
                </label>
                <div class="input-with-action">
                    <input
                        type=move || if show_password.get() { "text" } else { "password" }
                        id="password"
                        name="password"
                        autocomplete="current-password"
                        placeholder="Enter your password"
                        class="input-base"
                        class:input-invalid=move || password_error.get().is_some()
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            password.set(event_target_value(&ev));
                            clear_errors.run(());
                        }
                    />
                    <button
                        type="button"
                        class="input-action"
                        aria-label="Toggle password visibility"
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || {
                            let icon = if show_password.get() { icons::EYE_CLOSED } else { icons::EYE };
                            view! { <Icon name=icon class="icon-text" /> }
                        }}
                    </button>
                </div>
                {move || password_error.get().map(|error| view! { <div class="field-error">{error}</div> })}
            </div>

            <button type="submit" class="btn btn-primary btn-block" disabled=move || auth.loading.get()>
                {move || {
                    if auth.loading.get() {
                        view! { <InlineSpinner /> "Signing in..." }.into_any()
                    } else {
                        "Sign In".into_any()
                    }
                }}
            </button>

            <p class="auth-form-footer">
                "Don't have an account? "
                <A href=AppRoute::Register.path()>"Sign up"</A>
            </p>
        </form>
    }
}
