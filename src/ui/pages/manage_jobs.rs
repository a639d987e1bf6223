//! Recruiter job management
//!
//! Post new jobs, browse own postings, and review the applicants of a selected job.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::api::RecruiterApi;
use crate::core::models::{Application, ApplicationStatus, ExperienceLevel, Job, JobDraft, JobType};
use crate::core::validation::{ValidationError, parse_positive_decimal, split_list};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{
    EmptyState, ErrorMessage, FormField, InlineSpinner, SelectField, Spinner, TextAreaField,
    field_error,
};
use crate::ui::jobs::{ApplicationRow, JobCard};
use crate::ui::notifications::use_toasts;

#[component]
pub fn ManageJobsPage() -> impl IntoView {
    let auth = use_auth_context();
    let jobs = RwSignal::new(None::<Vec<Job>>);
    let error = RwSignal::new(None::<String>);
    let show_form = RwSignal::new(false);
    let selected = RwSignal::new(None::<i64>);

    let load_jobs = move || {
        let client = auth.client();
        spawn_local(async move {
            match RecruiterApi::new(&client).my_jobs().await {
                Ok(list) => jobs.set(Some(list)),
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    };

    Effect::new(move |_| load_jobs());

    let on_created = Callback::new(move |job: Job| {
        show_form.set(false);
        jobs.update(|list| list.get_or_insert_with(Vec::new).insert(0, job));
    });

    view! {
        <main class="page">
            <header class="page-header">
                <h1>"Manage jobs"</h1>
                <button class="btn btn-primary" on:click=move |_| show_form.update(|v| *v = !*v)>
                    {move || if show_form.get() { "Close" } else { "Post a job" }}
                </button>
            </header>

            <ErrorMessage error=error />

            <Show when=move || show_form.get()>
                <JobForm on_created=on_created />
            </Show>

            {move || match jobs.get() {
                None if error.get().is_none() => view! { <Spinner /> }.into_any(),
                None => ().into_any(),
                Some(list) if list.is_empty() => {
                    view! { <EmptyState title="No jobs posted yet" hint="Use \"Post a job\" to publish one" /> }.into_any()
                }
                Some(list) => list
                    .into_iter()
                    .map(|job| {
                        let job_id = job.id;
                        view! {
                            <JobCard job=job>
                                <button
                                    class="btn btn-ghost"
                                    on:click=move |_| {
                                        selected.update(|current| {
                                            *current = if *current == Some(job_id) { None } else { Some(job_id) };
                                        })
                                    }
                                >
                                    {move || if selected.get() == Some(job_id) { "Hide applicants" } else { "View applicants" }}
                                </button>
                                <Show when=move || selected.get() == Some(job_id)>
                                    <Applicants job_id=job_id />
                                </Show>
                            </JobCard>
                        }
                    })
                    .collect_view()
                    .into_any(),
            }}
        </main>
    }
}

#[component]
fn JobForm(on_created: Callback<Job>) -> impl IntoView {
    let auth = use_auth_context();
    let toasts = use_toasts();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let pay = RwSignal::new(String::new());
    let level = RwSignal::new(ExperienceLevel::Mid.as_str().to_string());
    let job_type = RwSignal::new(JobType::default().as_str().to_string());
    let location = RwSignal::new(String::new());
    let remote = RwSignal::new(true);
    let requirements = RwSignal::new(String::new());
    let deadline = RwSignal::new(String::new());
    let skills = RwSignal::new(String::new());

    let invalid = RwSignal::new(None::<ValidationError>);
    let submitting = RwSignal::new(false);

    let level_options = ExperienceLevel::ALL
        .iter()
        .map(|l| (l.as_str(), l.to_string()))
        .collect::<Vec<_>>();
    let type_options = JobType::ALL
        .iter()
        .map(|t| (t.as_str(), t.to_string()))
        .collect::<Vec<_>>();

    let non_blank = |value: String| Some(value.trim().to_string()).filter(|v| !v.is_empty());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let draft = match parse_positive_decimal(&pay.get(), "pay_per_hour") {
            Ok(pay_per_hour) => JobDraft {
                title: title.get().trim().to_string(),
                description: description.get().trim().to_string(),
                pay_per_hour: pay_per_hour.unwrap_or_default(),
                experience_level: level.get().parse().unwrap_or(ExperienceLevel::Mid),
                job_type: job_type.get().parse().unwrap_or_default(),
                location: non_blank(location.get()),
                is_remote: remote.get(),
                requirements: non_blank(requirements.get()),
                application_deadline: non_blank(deadline.get()),
                required_skills: split_list(&skills.get()),
            },
            Err(err) => {
                invalid.set(Some(err));
                return;
            }
        };
        if let Err(err) = draft.validate() {
            invalid.set(Some(err));
            return;
        }
        invalid.set(None);

        let client = auth.client();
        submitting.set(true);
        spawn_local(async move {
            if let Ok(job) = RecruiterApi::new(&client).create_job(&draft).await {
                toasts.success("Job posted", format!("\"{}\" is now live", job.title));
                on_created.run(job);
            }
            submitting.set(false);
        });
    };

    view! {
        <form class="card job-form" on:submit=on_submit novalidate>
            <FormField label="Title" name="title" required=true value=title error=field_error(invalid, "title") />
            <TextAreaField
                label="Description"
                name="description"
                required=true
                rows=6
                value=description
                error=field_error(invalid, "description")
            />
            <div class="field-row">
                <FormField
                    label="Pay ($/hr)"
                    name="pay_per_hour"
                    input_type="number"
                    required=true
                    value=pay
                    error=field_error(invalid, "pay_per_hour")
                />
                <SelectField label="Level" name="experience_level" options=level_options value=level />
                <SelectField label="Type" name="job_type" options=type_options value=job_type />
            </div>
            <div class="field-row">
                <FormField label="Location" name="location" placeholder="City, country" value=location />
                <FormField label="Apply by" name="application_deadline" input_type="date" value=deadline />
            </div>
            <label class="checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || remote.get()
                    on:change=move |ev| remote.set(event_target_checked(&ev))
                />
                "Remote friendly"
            </label>
            <FormField label="Skills" name="required_skills" placeholder="rust, postgres, docker" value=skills />
            <TextAreaField label="Requirements" name="requirements" value=requirements />

            <div class="button-row">
                <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                    {move || submitting.get().then(|| view! { <InlineSpinner /> })}
                    "Publish"
                </button>
            </div>
        </form>
    }
}

/// Applicants of one job with review controls
#[component]
fn Applicants(job_id: i64) -> impl IntoView {
    let auth = use_auth_context();
    let applications = RwSignal::new(None::<Vec<Application>>);

    Effect::new(move |_| {
        let client = auth.client();
        spawn_local(async move {
            if let Ok(list) = RecruiterApi::new(&client).job_applications(job_id).await {
                applications.set(Some(list));
            }
        });
    });

    let on_updated = Callback::new(move |updated: Application| {
        applications.update(|list| {
            if let Some(slot) = list.iter_mut().flatten().find(|a| a.id == updated.id) {
                *slot = updated;
            }
        });
    });

    move || match applications.get() {
        None => view! { <InlineSpinner /> }.into_any(),
        Some(list) if list.is_empty() => view! { <EmptyState title="No applicants yet" /> }.into_any(),
        Some(list) => view! {
            <div class="applicant-list">
                {list
                    .into_iter()
                    .map(|application| {
                        let id = application.id;
                        let status = application.status;
                        view! {
                            <ApplicationRow application=application>
                                <ReviewControls application_id=id current=status on_updated=on_updated />
                            </ApplicationRow>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any(),
    }
}

#[component]
fn ReviewControls(
    application_id: i64,
    current: ApplicationStatus,
    on_updated: Callback<Application>,
) -> impl IntoView {
    let auth = use_auth_context();
    let toasts = use_toasts();

    let initial = if current.is_review_outcome() { current } else { ApplicationStatus::Reviewed };
    let status = RwSignal::new(initial.as_str().to_string());
    let notes = RwSignal::new(String::new());
    let saving = RwSignal::new(false);

    let options = ApplicationStatus::REVIEW_OUTCOMES
        .iter()
        .map(|s| (s.as_str(), s.to_string()))
        .collect::<Vec<_>>();

    let save = move |_: leptos::ev::MouseEvent| {
        let Ok(next) = status.get().parse::<ApplicationStatus>() else {
            return;
        };
        let notes = notes.get();
        let client = auth.client();
        saving.set(true);
        spawn_local(async move {
            let api = RecruiterApi::new(&client);
            if let Ok(updated) = api.update_application_status(application_id, next, Some(&notes)).await {
                toasts.success("Status updated", format!("Application marked {}", next.to_string().to_lowercase()));
                on_updated.run(updated);
            }
            saving.set(false);
        });
    };

    view! {
        <div class="review-controls">
            <SelectField label="Status" name="status" options=options value=status />
            <FormField label="Notes" name="recruiter_notes" placeholder="Visible to the applicant" value=notes />
            <button class="btn btn-primary" disabled=move || saving.get() on:click=save>"Update"</button>
        </div>
    }
}
