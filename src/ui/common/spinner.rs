use leptos::prelude::*;

/// Spinner size options
#[derive(Clone, Copy, PartialEq)]
pub enum SpinnerSize {
    Small,
    Medium,
    Large,
}

impl SpinnerSize {
    fn class(&self) -> &'static str {
        match self {
            SpinnerSize::Small => "spinner-sm",
            SpinnerSize::Medium => "spinner-md",
            SpinnerSize::Large => "spinner-lg",
        }
    }
}

/// Loading spinner component
#[component]
pub fn Spinner(
    #[prop(default = SpinnerSize::Medium)] size: SpinnerSize,
    /// Optional label text
    #[prop(default = String::new())]
    label: String,
) -> impl IntoView {
    view! {
        <div class="spinner-container">
            <div class=format!("spinner {}", size.class()) role="status" aria-live="polite">
                <span class="sr-only">"Loading..."</span>
            </div>
            {(!label.is_empty()).then(|| view! { <div class="spinner-label">{label.clone()}</div> })}
        </div>
    }
}

/// Inline spinner for buttons
#[component]
pub fn InlineSpinner() -> impl IntoView {
    view! { <span class="spinner spinner-sm spinner-inline" aria-hidden="true"></span> }
}

/// Full-page placeholder shown while the session is being checked
#[component]
pub fn LoadingScreen(#[prop(default = "Loading...".to_string())] message: String) -> impl IntoView {
    view! {
        <div class="loading-screen">
            <Spinner size=SpinnerSize::Large label=message />
        </div>
    }
}
