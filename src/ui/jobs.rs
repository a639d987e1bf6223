//! Job and application display widgets shared by the role pages

use leptos::prelude::*;

use crate::core::models::{Application, ApplicationStatus, Job};

/// Colored pill for an application status
#[component]
pub fn StatusBadge(status: ApplicationStatus) -> impl IntoView {
    view! {
        <span class=format!("status-badge status-{}", status.as_str())>{status.to_string()}</span>
    }
}

#[component]
pub fn StatCard(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="card stat-card">
            <span class="stat-value">{value}</span>
            <span class="stat-label">{label}</span>
        </div>
    }
}

/// Summary card for a job posting. `children` render in the card footer.
#[component]
pub fn JobCard(job: Job, #[prop(optional)] children: Option<Children>) -> impl IntoView {
    let meta = [
        Some(job.experience_level.to_string()),
        Some(job.job_type.to_string()),
        job.is_remote.then(|| "Remote".to_string()),
        job.location.clone().filter(|l| !l.trim().is_empty()),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" · ");

    let skills = job
        .required_skills
        .iter()
        .chain(job.tech_stack.iter())
        .cloned()
        .collect::<Vec<_>>();

    view! {
        <article class="card job-card" class:job-inactive=!job.is_active>
            <header class="job-card-header">
                <div>
                    <h3 class="job-title">{job.title.clone()}</h3>
                    {job.company_name.clone().map(|company| view! { <p class="text-muted">{company}</p> })}
                </div>
                <span class="job-pay">{job.pay_label()}</span>
            </header>
            <p class="job-meta">{meta}</p>
            <p class="job-description">{job.description.clone()}</p>
            {(!skills.is_empty()).then(|| view! {
                <ul class="tag-list">
                    {skills.into_iter().map(|skill| view! { <li class="tag">{skill}</li> }).collect_view()}
                </ul>
            })}
            {job.total_applications.map(|count| view! {
                <p class="text-muted">{format!("{count} application(s)")}</p>
            })}
            {children.map(|children| view! { <footer class="job-card-footer">{children()}</footer> })}
        </article>
    }
}

/// One application row. Shows the job for freelancers and the applicant for recruiters.
#[component]
pub fn ApplicationRow(
    application: Application,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let heading = application
        .freelancer_name
        .clone()
        .or_else(|| application.title.clone())
        .unwrap_or_else(|| format!("Job #{}", application.job_id));
    let detail = application
        .freelancer_email
        .clone()
        .or_else(|| application.company_name.clone());
    let rate = application
        .proposed_rate
        .map(|rate| format!("${rate:.2}/hr proposed"));

    view! {
        <div class="application-row">
            <div class="application-row-main">
                <p class="application-heading">{heading}</p>
                {detail.map(|detail| view! { <p class="text-muted">{detail}</p> })}
                {application.applied_at.clone().map(|date| view! { <p class="text-muted">{format!("Applied {date}")}</p> })}
                {rate.map(|rate| view! { <p class="text-muted">{rate}</p> })}
                {application.cover_letter.clone().map(|letter| view! { <p class="application-letter">{letter}</p> })}
                {application.recruiter_notes.clone().map(|notes| view! { <p class="application-notes">{notes}</p> })}
            </div>
            <div class="application-row-side">
                <StatusBadge status=application.status />
                {children.map(|children| children())}
            </div>
        </div>
    }
}
