//! Register form component
//!
//! Sign-up with profile basics and an account role. The role cannot be changed later,
//! so it is picked up front.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::core::routes::AppRoute;
use crate::core::session::{Registration, Role};
use crate::core::validation::{MIN_PASSWORD_LENGTH, ValidationError};
use crate::ui::common::{ErrorMessage, FormField, InlineSpinner, SelectField, field_error};

/// Register form component
#[component]
pub fn RegisterForm(
    /// Callback when registration is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();

    let username = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Freelancer.as_str().to_string());
    let invalid = RwSignal::new(None::<ValidationError>);

    let clear_errors = Callback::new(move |_| {
        invalid.set(None);
        auth.clear_error();
    });

    let role_options = Role::ALL
        .iter()
        .map(|role| (role.as_str(), role.display_name().to_string()))
        .collect::<Vec<_>>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        auth.clear_error();

        let registration = Registration {
            username: username.get().trim().to_string(),
            email: email.get().trim().to_string(),
            password: password.get(),
            first_name: first_name.get().trim().to_string(),
            last_name: last_name.get().trim().to_string(),
            user_type: role.get().parse().unwrap_or(Role::Freelancer),
        };

        if let Err(err) = registration.validate_with_confirmation(&confirm_password.get()) {
            invalid.set(Some(err));
            return;
        }
        invalid.set(None);

        spawn_local(async move {
            if auth.register(registration).await.is_ok() {
                if let Some(callback) = on_success {
                    callback.run(());
                }
            }
        });
    };

    view! {
        <form on:submit=on_submit class="auth-form" novalidate>
            <div class="auth-form-header">
                <h2>"Create an account"</h2>
                <p>"Find work or hire talent"</p>
            </div>

            <ErrorMessage error=auth.error />

            <SelectField label="I am a" name="user_type" options=role_options value=role />

            <FormField
                label="Username"
                name="username"
                autocomplete="username"
                required=true
                value=username
                error=field_error(invalid, "username")
                on_edit=clear_errors
            />

            <div class="field-row">
                <FormField
                    label="First name"
                    name="first_name"
                    autocomplete="given-name"
                    required=true
                    value=first_name
                    error=field_error(invalid, "first_name")
                    on_edit=clear_errors
                />
                <FormField
                    label="Last name"
                    name="last_name"
                    autocomplete="family-name"
                    required=true
                    value=last_name
                    error=field_error(invalid, "last_name")
                    on_edit=clear_errors
                />
            </div>

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

            <FormField
                label="Password"
                name="password"
                input_type="password"
                autocomplete="new-password"
                required=true
                value=password
                error=field_error(invalid, "password")
                on_edit=clear_errors
            />
            <p class="field-hint">
                {format!(
                    "At least {MIN_PASSWORD_LENGTH} characters with upper and lower case letters, a number and a special character"
                )}
            </p>

            <FormField
                label="Confirm password"
                name="confirm_password"
                input_type="password"
                autocomplete="new-password"
                required=true
                value=confirm_password
                error=field_error(invalid, "confirm_password")
                on_edit=clear_errors
            />

            <button type="submit" class="btn btn-primary btn-block" disabled=move || auth.loading.get()>
                {move || {
                    if auth.loading.get() {
                        view! { <InlineSpinner /> "Creating account..." }.into_any()
                    } else {
                        "Sign Up".into_any()
                    }
                }}
            </button>

            <p class="auth-form-footer">
                "Already have an account? "
                <A href=AppRoute::Login.path()>"Sign in"</A>
            </p>
        </form>
    }
}
