//! User profile page component
//!
//! Account summary plus the role-specific profile editor.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::api::{FreelancerApi, RecruiterApi};
use crate::core::models::{FreelancerProfile, RecruiterProfile};
use crate::core::session::Role;
use crate::core::validation::{ValidationError, parse_positive_decimal};
use crate::ui::auth::{UserAvatar, use_auth_context};
use crate::ui::common::{FormField, InlineSpinner, Spinner, SuccessMessage, TextAreaField, field_error};
use crate::ui::notifications::use_toasts;

/// Profile page component
#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth_context();

    view! {
        <main class="page">
            {move || auth.user().map(|user| {
                let role = user.role.display_name();
                view! {
                    <section class="card profile-summary">
                        <UserAvatar user=user.clone() />
                        <div>
                            <h1>{user.display_name()}</h1>
                            <p class="text-muted">{format!("@{} · {}", user.username, user.email)}</p>
                            <span class="role-badge">{role}</span>
                        </div>
                    </section>
                }
            })}

            {move || match auth.role() {
                Some(Role::Freelancer) => view! { <FreelancerProfileEditor /> }.into_any(),
                Some(Role::Recruiter) => view! { <RecruiterProfileEditor /> }.into_any(),
                None => ().into_any(),
            }}
        </main>
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn optional(value: String) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

#[component]
fn FreelancerProfileEditor() -> impl IntoView {
    let auth = use_auth_context();
    let toasts = use_toasts();

    let loaded = RwSignal::new(None::<FreelancerProfile>);
    let bio = RwSignal::new(String::new());
    let rate = RwSignal::new(String::new());
    let education = RwSignal::new(String::new());
    let experience = RwSignal::new(String::new());
    let github = RwSignal::new(String::new());
    let linkedin = RwSignal::new(String::new());
    let portfolio = RwSignal::new(String::new());
    let available = RwSignal::new(true);
    let invalid = RwSignal::new(None::<ValidationError>);
    let saving = RwSignal::new(false);
    let saved = RwSignal::new(None::<String>);

    let fill = move |profile: &FreelancerProfile| {
        bio.set(text(&profile.bio));
        rate.set(profile.hourly_rate.map(|r| r.to_string()).unwrap_or_default());
        education.set(text(&profile.education));
        experience.set(text(&profile.experience));
        github.set(text(&profile.github_url));
        linkedin.set(text(&profile.linkedin_url));
        portfolio.set(text(&profile.portfolio_url));
        available.set(profile.is_available);
    };

    Effect::new(move |_| {
        let client = auth.client();
        spawn_local(async move {
            if let Ok(profile) = FreelancerApi::new(&client).profile().await {
                fill(&profile);
                loaded.set(Some(profile));
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        saved.set(None);

        let hourly_rate = match parse_positive_decimal(&rate.get(), "hourly_rate") {
            Ok(value) => value,
            Err(err) => {
                invalid.set(Some(err));
                return;
            }
        };
        invalid.set(None);

        let profile = FreelancerProfile {
            bio: optional(bio.get()),
            hourly_rate,
            education: optional(education.get()),
            experience: optional(experience.get()),
            github_url: optional(github.get()),
            linkedin_url: optional(linkedin.get()),
            portfolio_url: optional(portfolio.get()),
            is_available: available.get(),
            skills: loaded.with(|p| p.as_ref().map(|p| p.skills.clone()).unwrap_or_default()),
        };

        let client = auth.client();
        saving.set(true);
        spawn_local(async move {
            if let Ok(profile) = FreelancerApi::new(&client).update_profile(&profile).await {
                fill(&profile);
                loaded.set(Some(profile));
                saved.set(Some("Profile saved".to_string()));
                toasts.success("Profile", "Your changes were saved");
            }
            saving.set(false);
        });
    };

    view! {
        <Show when=move || loaded.with(Option::is_some) fallback=|| view! { <Spinner /> }>
            <form class="card profile-form" on:submit=on_submit>
                <h2>"Freelancer profile"</h2>
                <SuccessMessage message=saved />
                <TextAreaField label="Bio" name="bio" value=bio placeholder="What do you do best?" />
                <div class="field-row">
                    <FormField
                        label="Hourly rate ($)"
                        name="hourly_rate"
                        input_type="number"
                        value=rate
                        error=field_error(invalid, "hourly_rate")
                    />
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || available.get()
                            on:change=move |ev| available.set(event_target_checked(&ev))
                        />
                        "Available for work"
                    </label>
                </div>
                <TextAreaField label="Experience" name="experience" value=experience rows=3 />
                <TextAreaField label="Education" name="education" value=education rows=2 />
                <FormField label="GitHub" name="github_url" input_type="url" value=github />
                <FormField label="LinkedIn" name="linkedin_url" input_type="url" value=linkedin />
                <FormField label="Portfolio" name="portfolio_url" input_type="url" value=portfolio />

                {move || {
                    let skills = loaded.with(|p| p.as_ref().map(|p| p.skills.clone()).unwrap_or_default());
                    (!skills.is_empty()).then(|| view! {
                        <div class="field">
                            <span class="label">"Skills"</span>
                            <ul class="tag-list">
                                {skills
                                    .into_iter()
                                    .map(|skill| {
                                        let label = match skill.proficiency_level {
                                            Some(level) => format!("{} ({level})", skill.name),
                                            None => skill.name,
                                        };
                                        view! { <li class="tag">{label}</li> }
                                    })
                                    .collect_view()}
                            </ul>
                        </div>
                    })
                }}

                <div class="button-row">
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {move || saving.get().then(|| view! { <InlineSpinner /> })}
                        "Save profile"
                    </button>
                </div>
            </form>
        </Show>
    }
}

#[component]
fn RecruiterProfileEditor() -> impl IntoView {
    let auth = use_auth_context();
    let toasts = use_toasts();

    let loaded = RwSignal::new(false);
    let company_name = RwSignal::new(String::new());
    let website = RwSignal::new(String::new());
    let size = RwSignal::new(String::new());
    let industry = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let saving = RwSignal::new(false);
    let saved = RwSignal::new(None::<String>);

    let fill = move |profile: &RecruiterProfile| {
        company_name.set(text(&profile.company_name));
        website.set(text(&profile.company_website));
        size.set(text(&profile.company_size));
        industry.set(text(&profile.industry));
        description.set(text(&profile.company_description));
        location.set(text(&profile.location));
        phone.set(text(&profile.phone));
    };

    Effect::new(move |_| {
        let client = auth.client();
        spawn_local(async move {
            if let Ok(profile) = RecruiterApi::new(&client).profile().await {
                fill(&profile);
                loaded.set(true);
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        saved.set(None);

        let profile = RecruiterProfile {
            company_name: optional(company_name.get()),
            company_website: optional(website.get()),
            company_size: optional(size.get()),
            industry: optional(industry.get()),
            company_description: optional(description.get()),
            location: optional(location.get()),
            phone: optional(phone.get()),
        };

        let client = auth.client();
        saving.set(true);
        spawn_local(async move {
            if let Ok(profile) = RecruiterApi::new(&client).update_profile(&profile).await {
                fill(&profile);
                saved.set(Some("Profile saved".to_string()));
                toasts.success("Profile", "Your changes were saved");
            }
            saving.set(false);
        });
    };

    view! {
        <Show when=move || loaded.get() fallback=|| view! { <Spinner /> }>
            <form class="card profile-form" on:submit=on_submit>
                <h2>"Company profile"</h2>
                <SuccessMessage message=saved />
                <FormField label="Company name" name="company_name" value=company_name />
                <div class="field-row">
                    <FormField label="Website" name="company_website" input_type="url" value=website />
                    <FormField label="Company size" name="company_size" placeholder="11-50" value=size />
                </div>
                <div class="field-row">
                    <FormField label="Industry" name="industry" value=industry />
                    <FormField label="Location" name="location" value=location />
                </div>
                <FormField label="Phone" name="phone" input_type="tel" value=phone />
                <TextAreaField label="About the company" name="company_description" value=description />

                <div class="button-row">
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {move || saving.get().then(|| view! { <InlineSpinner /> })}
                        "Save profile"
                    </button>
                </div>
            </form>
        </Show>
    }
}
