//! Freelancer application history

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::api::FreelancerApi;
use crate::core::models::{Application, ApplicationStatus};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{EmptyState, ErrorMessage, Spinner};
use crate::ui::jobs::ApplicationRow;

#[component]
pub fn MyApplicationsPage() -> impl IntoView {
    let auth = use_auth_context();
    let applications = RwSignal::new(None::<Vec<Application>>);
    let error = RwSignal::new(None::<String>);
    // None shows every status
    let filter = RwSignal::new(None::<ApplicationStatus>);

    Effect::new(move |_| {
        let client = auth.client();
        spawn_local(async move {
            match FreelancerApi::new(&client).applications().await {
                Ok(list) => applications.set(Some(list)),
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    });

    let visible = move || {
        applications.get().map(|list| {
            list.into_iter()
                .filter(|application| filter.get().is_none_or(|status| application.status == status))
                .collect::<Vec<_>>()
        })
    };

    let filter_button = move |label: String, status: Option<ApplicationStatus>| {
        view! {
            <button
                class="chip"
                class:chip-active=move || filter.get() == status
                on:click=move |_| filter.set(status)
            >
                {label}
            </button>
        }
    };

    view! {
        <main class="page">
            <header class="page-header">
                <h1>"My applications"</h1>
            </header>

            <ErrorMessage error=error />

            <div class="chip-row">
                {filter_button("All".to_string(), None)}
                {ApplicationStatus::ALL
                    .into_iter()
                    .map(|status| filter_button(status.to_string(), Some(status)))
                    .collect_view()}
            </div>

            {move || match visible() {
                None if error.get().is_none() => view! { <Spinner label="Loading applications".to_string() /> }.into_any(),
                None => ().into_any(),
                Some(list) if list.is_empty() => {
                    view! { <EmptyState title="No applications here" hint="Apply to jobs from your dashboard" /> }.into_any()
                }
                Some(list) => list
                    .into_iter()
                    .map(|application| view! { <ApplicationRow application=application /> })
                    .collect_view()
                    .into_any(),
            }}
        </main>
    }
}
