use crate::core::validation::ValidationError;
use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

#[component]
fn FieldError(error: Option<Signal<Option<String>>>) -> impl IntoView {
    move || {
        error.and_then(|e| e.get()).map(|err| {
            view! {
                <div class="field-error">
                    <Icon name=icons::ALERT_CIRCLE class="icon-text"/>
                    <span>{err}</span>
                </div>
            }
        })
    }
}

/// Generic form field component with label and input
#[component]
pub fn FormField(
    /// Field label text
    label: &'static str,
    /// Input id and name
    name: &'static str,
    /// Shows a red asterisk
    #[prop(default = false)]
    required: bool,
    /// Input type (text, password, email, etc.)
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(default = "")] placeholder: &'static str,
    #[prop(default = "off")] autocomplete: &'static str,
    /// Current value signal
    value: RwSignal<String>,
    /// Optional error message to display
    #[prop(optional, into)]
    error: Option<Signal<Option<String>>>,
    /// Runs after every edit, e.g. to clear a stale error
    #[prop(optional)]
    on_edit: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="field">
            <label class="label" for=name>
                {label}
                {required.then(|| view! { <span class="required-mark">"*"</span> })}
            </label>
            <input
                type=input_type
                id=name
                name=name
                class="input-base"
                class:input-invalid=move || error.and_then(|e| e.get()).is_some()
                placeholder=placeholder
                autocomplete=autocomplete
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    if let Some(callback) = on_edit {
                        callback.run(());
                    }
                }
            />
            <FieldError error=error />
        </div>
    }
}

/// Text area form field component
#[component]
pub fn TextAreaField(
    label: &'static str,
    name: &'static str,
    #[prop(default = false)] required: bool,
    #[prop(default = "")] placeholder: &'static str,
    value: RwSignal<String>,
    #[prop(default = 4)] rows: u32,
    #[prop(optional, into)] error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div class="field">
            <label class="label" for=name>
                {label}
                {required.then(|| view! { <span class="required-mark">"*"</span> })}
            </label>
            <textarea
                id=name
                name=name
                class="input-base"
                class:input-invalid=move || error.and_then(|e| e.get()).is_some()
                placeholder=placeholder
                rows=rows
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
            <FieldError error=error />
        </div>
    }
}

/// Select field over `(value, label)` options
#[component]
pub fn SelectField(
    label: &'static str,
    name: &'static str,
    options: Vec<(&'static str, String)>,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="field">
            <label class="label" for=name>{label}</label>
            <select
                id=name
                name=name
                class="input-base"
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(option_value, option_label)| {
                        view! {
                            <option value=option_value selected=move || value.get() == option_value>
                                {option_label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

/// Message of `error` when it belongs to `field`
pub fn field_error(
    error: RwSignal<Option<ValidationError>>,
    field: &'static str,
) -> Signal<Option<String>> {
    Signal::derive(move || {
        error.with(|err| {
            err.as_ref()
                .filter(|err| err.field() == field)
                .map(ToString::to_string)
        })
    })
}
