//! Dashboard page component
//!
//! Role home screen. Freelancers get their stats, a job search and one-click
//! applications; recruiters get posting and applicant stats.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::core::api::{FreelancerApi, RecruiterApi};
use crate::core::models::{
    ApplicationDraft, ExperienceLevel, FreelancerDashboard, Job, JobSearchFilters, JobType,
    RecruiterDashboard,
};
use crate::core::routes::AppRoute;
use crate::core::session::Role;
use crate::core::validation::{ValidationError, parse_positive_decimal};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{
    EmptyState, ErrorMessage, FormField, InlineSpinner, SelectField, Spinner, TextAreaField,
    field_error,
};
use crate::ui::jobs::{ApplicationRow, JobCard, StatCard};
use crate::ui::notifications::use_toasts;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth_context();

    view! {
        <main class="page">
            <header class="page-header">
                <h1>{move || auth.user().map(|user| format!("Hi, {}", user.display_name()))}</h1>
            </header>
            {move || match auth.role() {
                Some(Role::Freelancer) => view! { <FreelancerDashboardView /> }.into_any(),
                Some(Role::Recruiter) => view! { <RecruiterDashboardView /> }.into_any(),
                None => ().into_any(),
            }}
        </main>
    }
}

#[component]
fn FreelancerDashboardView() -> impl IntoView {
    let auth = use_auth_context();
    let dashboard = RwSignal::new(None::<FreelancerDashboard>);
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let client = auth.client();
        spawn_local(async move {
            match FreelancerApi::new(&client).dashboard().await {
                Ok(data) => dashboard.set(Some(data)),
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    });

    let stat = move |pick: fn(&FreelancerDashboard) -> String| {
        Signal::derive(move || dashboard.with(|d| d.as_ref().map(pick).unwrap_or_default()))
    };

    view! {
        <ErrorMessage error=error />
        <section class="stat-grid">
            <StatCard label="Applications" value=stat(|d| d.stats.total_applications.to_string()) />
            <StatCard label="Pending" value=stat(|d| d.stats.pending_applications.to_string()) />
            <StatCard label="Accepted" value=stat(|d| d.stats.accepted_applications.to_string()) />
            <StatCard label="Profile complete" value=stat(|d| format!("{}%", d.stats.profile_completion)) />
        </section>

        <section class="section">
            <div class="section-header">
                <h2>"Recent applications"</h2>
                <A href=AppRoute::MyApplications.path() attr:class="btn-link">"View all"</A>
            </div>
            {move || match dashboard.get() {
                None => view! { <Spinner /> }.into_any(),
                Some(data) if data.recent_applications.is_empty() => {
                    view! { <EmptyState title="No applications yet" hint="Search for a job below and apply" /> }.into_any()
                }
                Some(data) => data
                    .recent_applications
                    .into_iter()
                    .map(|application| view! { <ApplicationRow application=application /> })
                    .collect_view()
                    .into_any(),
            }}
        </section>

        <JobSearch recommended=Signal::derive(move || {
            dashboard.with(|d| d.as_ref().map(|d| d.recommended_jobs.clone()).unwrap_or_default())
        }) />
    }
}

/// Job search with filters. Shows `recommended` until the first search runs.
#[component]
fn JobSearch(recommended: Signal<Vec<Job>>) -> impl IntoView {
    let auth = use_auth_context();

    let search = RwSignal::new(String::new());
    let level = RwSignal::new(String::new());
    let job_type = RwSignal::new(String::new());
    let min_pay = RwSignal::new(String::new());
    let remote_only = RwSignal::new(false);
    let invalid = RwSignal::new(None::<ValidationError>);

    let results = RwSignal::new(None::<Vec<Job>>);
    let searching = RwSignal::new(false);

    let level_options = std::iter::once(("", "Any level".to_string()))
        .chain(ExperienceLevel::ALL.iter().map(|l| (l.as_str(), l.to_string())))
        .collect::<Vec<_>>();
    let type_options = std::iter::once(("", "Any type".to_string()))
        .chain(JobType::ALL.iter().map(|t| (t.as_str(), t.to_string())))
        .collect::<Vec<_>>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let min_pay = match parse_positive_decimal(&min_pay.get(), "min_pay") {
            Ok(value) => value,
            Err(err) => {
                invalid.set(Some(err));
                return;
            }
        };
        invalid.set(None);

        let filters = JobSearchFilters {
            search: Some(search.get().trim().to_string()).filter(|s| !s.is_empty()),
            experience_level: level.get().parse().ok(),
            min_pay,
            max_pay: None,
            job_type: job_type.get().parse().ok(),
            is_remote: remote_only.get(),
        };

        let client = auth.client();
        searching.set(true);
        spawn_local(async move {
            if let Ok(jobs) = FreelancerApi::new(&client).search_jobs(&filters).await {
                results.set(Some(jobs));
            }
            searching.set(false);
        });
    };

    let shown = move || results.get().unwrap_or_else(|| recommended.get());

    view! {
        <section class="section">
            <div class="section-header">
                <h2>{move || if results.with(Option::is_some) { "Search results" } else { "Recommended for you" }}</h2>
            </div>

            <form class="search-form" on:submit=on_submit>
                <FormField label="Keywords" name="search" placeholder="rust, backend, ..." value=search />
                <SelectField label="Level" name="experience_level" options=level_options value=level />
                <SelectField label="Type" name="job_type" options=type_options value=job_type />
                <FormField
                    label="Min $/hr"
                    name="min_pay"
                    input_type="number"
                    value=min_pay
                    error=field_error(invalid, "min_pay")
                />
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || remote_only.get()
                        on:change=move |ev| remote_only.set(event_target_checked(&ev))
                    />
                    "Remote only"
                </label>
                <button type="submit" class="btn btn-primary" disabled=move || searching.get()>
                    {move || searching.get().then(|| view! { <InlineSpinner /> })}
                    "Search"
                </button>
            </form>

            {move || {
                let jobs = shown();
                if jobs.is_empty() {
                    view! { <EmptyState title="No jobs found" hint="Try widening the filters" /> }.into_any()
                } else {
                    jobs.into_iter()
                        .map(|job| {
                            let job_id = job.id;
                            view! {
                                <JobCard job=job>
                                    <ApplyPanel job_id=job_id />
                                </JobCard>
                            }
                        })
                        .collect_view()
                        .into_any()
                }
            }}
        </section>
    }
}

/// Collapsible application form for one job
#[component]
fn ApplyPanel(job_id: i64) -> impl IntoView {
    let auth = use_auth_context();
    let toasts = use_toasts();

    let open = RwSignal::new(false);
    let applied = RwSignal::new(false);
    let submitting = RwSignal::new(false);
    let cover_letter = RwSignal::new(String::new());
    let rate = RwSignal::new(String::new());
    let availability = RwSignal::new(String::new());
    let invalid = RwSignal::new(None::<ValidationError>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let proposed_rate = match parse_positive_decimal(&rate.get(), "proposed_rate") {
            Ok(value) => value,
            Err(err) => {
                invalid.set(Some(err));
                return;
            }
        };
        let draft = ApplicationDraft {
            cover_letter: cover_letter.get().trim().to_string(),
            proposed_rate,
            availability_date: Some(availability.get()).filter(|d| !d.is_empty()),
        };
        if let Err(err) = draft.validate() {
            invalid.set(Some(err));
            return;
        }
        invalid.set(None);

        let client = auth.client();
        submitting.set(true);
        spawn_local(async move {
            if FreelancerApi::new(&client).apply(job_id, &draft).await.is_ok() {
                toasts.success("Application sent", "The recruiter has been notified");
                applied.set(true);
                open.set(false);
            }
            submitting.set(false);
        });
    };

    move || {
        if applied.get() {
            view! { <span class="text-success">"Applied"</span> }.into_any()
        } else if !open.get() {
            view! { <button class="btn btn-primary" on:click=move |_| open.set(true)>"Apply"</button> }.into_any()
        } else {
            view! {
                <form class="apply-form" on:submit=on_submit>
                    <TextAreaField
                        label="Cover letter"
                        name="cover_letter"
                        required=true
                        value=cover_letter
                        error=field_error(invalid, "cover_letter")
                    />
                    <div class="field-row">
                        <FormField
                            label="Your rate ($/hr)"
                            name="proposed_rate"
                            input_type="number"
                            value=rate
                            error=field_error(invalid, "proposed_rate")
                        />
                        <FormField label="Available from" name="availability_date" input_type="date" value=availability />
                    </div>
                    <div class="button-row">
                        <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                        <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                            "Send application"
                        </button>
                    </div>
                </form>
            }
            .into_any()
        }
    }
}

#[component]
fn RecruiterDashboardView() -> impl IntoView {
    let auth = use_auth_context();
    let dashboard = RwSignal::new(None::<RecruiterDashboard>);
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let client = auth.client();
        spawn_local(async move {
            match RecruiterApi::new(&client).dashboard().await {
                Ok(data) => dashboard.set(Some(data)),
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    });

    let stat = move |pick: fn(&RecruiterDashboard) -> u32| {
        Signal::derive(move || {
            dashboard.with(|d| d.as_ref().map(|d| pick(d).to_string()).unwrap_or_default())
        })
    };

    view! {
        <ErrorMessage error=error />
        <section class="stat-grid">
            <StatCard label="Active jobs" value=stat(|d| d.stats.active_jobs) />
            <StatCard label="Applications" value=stat(|d| d.stats.total_applications) />
            <StatCard label="Pending review" value=stat(|d| d.stats.pending_applications) />
            <StatCard label="Shortlisted" value=stat(|d| d.stats.shortlisted_applications) />
        </section>

        <section class="section">
            <div class="section-header">
                <h2>"Recent jobs"</h2>
                <A href=AppRoute::ManageJobs.path() attr:class="btn-link">"Manage jobs"</A>
            </div>
            {move || match dashboard.get() {
                None => view! { <Spinner /> }.into_any(),
                Some(data) if data.recent_jobs.is_empty() => {
                    view! { <EmptyState title="No jobs posted yet" hint="Post your first job from Manage Jobs" /> }.into_any()
                }
                Some(data) => data
                    .recent_jobs
                    .into_iter()
                    .map(|job| view! { <JobCard job=job /> })
                    .collect_view()
                    .into_any(),
            }}
        </section>

        <section class="section">
            <h2>"Latest applicants"</h2>
            {move || {
                dashboard.get().map(|data| {
                    if data.recent_applications.is_empty() {
                        view! { <EmptyState title="No applicants yet" /> }.into_any()
                    } else {
                        data.recent_applications
                            .into_iter()
                            .map(|application| view! { <ApplicationRow application=application /> })
                            .collect_view()
                            .into_any()
                    }
                })
            }}
        </section>
    }
}
