//! Landing page component
//!
//! Public entry point: pitch for both roles and a call to action that depends on
//! whether the visitor is already signed in.

use leptos::prelude::*;
use leptos_meta::{Meta, Title};
use leptos_router::components::A;

use crate::core::routes::AppRoute;
use crate::ui::auth::use_auth_context;
use crate::ui::icon::{Icon, icons};

#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth_context();

    let cta = move || {
        if auth.is_authenticated() {
            view! {
                <A href=AppRoute::Dashboard.path() attr:class="btn btn-primary btn-lg">"Go to dashboard"</A>
            }
            .into_any()
        } else {
            view! {
                <A href=AppRoute::Register.path() attr:class="btn btn-primary btn-lg">"Get started"</A>
                <A href=AppRoute::Login.path() attr:class="btn btn-ghost btn-lg">"Sign in"</A>
            }
            .into_any()
        }
    };

    view! {
        <SeoMeta />

        <main class="landing">
            <section class="hero">
                <h1>"Work that fits your skills"</h1>
                <p class="hero-lead">
                    "GigBoard connects freelancers with recruiters. Post hourly gigs, \
                     apply in a minute and track every application in one place."
                </p>
                <div class="button-row">{cta}</div>
            </section>

            <section class="feature-grid">
                <FeatureCard
                    icon=icons::USER
                    title="For freelancers"
                    text="Search remote and on-site jobs by pay, level and type. Apply with a cover letter and your rate."
                />
                <FeatureCard
                    icon=icons::BRIEFCASE
                    title="For recruiters"
                    text="Publish jobs, review applicants and shortlist, accept or reject with notes."
                />
                <FeatureCard
                    icon=icons::BELL
                    title="Stay in the loop"
                    text="Status changes arrive as notifications, so nobody has to chase an answer."
                />
            </section>
        </main>
    }
}

#[component]
fn FeatureCard(icon: &'static str, title: &'static str, text: &'static str) -> impl IntoView {
    view! {
        <article class="card feature-card">
            <Icon name=icon class="icon-feature" />
            <h3>{title}</h3>
            <p class="text-muted">{text}</p>
        </article>
    }
}

#[component]
fn SeoMeta() -> impl IntoView {
    view! {
        <Title text="GigBoard - Freelance jobs and hiring" />
        <Meta
            name="description"
            content="Find freelance work or hire freelancers. Post jobs, apply and track applications."
        />
        <Meta property="og:title" content="GigBoard" />
        <Meta property="og:type" content="website" />
    }
}
