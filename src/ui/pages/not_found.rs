//! Not found page component
//!
//! A 404 error page displayed when a route is not found.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::routes::AppRoute;
use crate::ui::auth::use_auth_context;
use crate::ui::icon::{Icon, icons};

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    let auth = use_auth_context();

    view! {
        <main class="centered-page">
            <Icon name=icons::SEARCH class="icon-hero" />
            <h1 class="hero-code">"404"</h1>
            <h2>"Page Not Found"</h2>
            <p class="text-muted">"The page you're looking for doesn't exist or has been moved."</p>

            <div class="button-row">
                <A href=AppRoute::Landing.path() attr:class="btn btn-primary">"Go Home"</A>
                <Show when=move || auth.is_authenticated()>
                    <A href=AppRoute::Dashboard.path() attr:class="btn btn-ghost">"Dashboard"</A>
                </Show>
            </div>
        </main>
    }
}
