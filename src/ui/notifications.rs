//! Toast notifications
//!
//! Session expiry, failed requests and form outcomes surface here.

use leptos::prelude::*;
use std::collections::VecDeque;

/// Maximum number of toasts to show at once
const MAX_TOASTS: usize = 5;

/// Default auto-dismiss delay
const DEFAULT_DISMISS_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    fn classes(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Warning => "toast toast-warning",
            ToastKind::Info => "toast toast-info",
        }
    }

    fn icon_path(&self) -> &'static str {
        match self {
            ToastKind::Success => "M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z",
            ToastKind::Error => "M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
            ToastKind::Warning => {
                "M12 9v2m0 4h.01m-6.938 4h13.856c1.54 0 2.502-1.667 1.732-3L13.732 4c-.77-1.333-2.694-1.333-3.464 0L3.34 16c-.77 1.333.192 3 1.732 3z"
            }
            ToastKind::Info => "M13 16h-1v-4h-1m1-4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
        }
    }
}

/// A toast with a unique id for tracking
#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    pub auto_dismiss_ms: Option<u32>,
}

/// Toast queue shared through context
#[derive(Clone, Copy)]
pub struct ToastManager {
    toasts: RwSignal<VecDeque<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(VecDeque::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn toasts(&self) -> RwSignal<VecDeque<Toast>> {
        self.toasts
    }

    pub fn notify(&self, kind: ToastKind, title: impl Into<String>, message: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        let toast = Toast {
            id,
            kind,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(DEFAULT_DISMISS_MS),
        };

        self.toasts.update(|toasts| {
            toasts.push_back(toast);
            // Drop oldest past the limit
            while toasts.len() > MAX_TOASTS {
                toasts.pop_front();
            }
        });
    }

    pub fn success(&self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(ToastKind::Success, title, message);
    }

    pub fn error(&self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(ToastKind::Error, title, message);
    }

    pub fn warning(&self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(ToastKind::Warning, title, message);
    }

    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(ToastKind::Info, title, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_toasts() -> ToastManager {
    let toasts = ToastManager::new();
    provide_context(toasts);
    toasts
}

pub fn use_toasts() -> ToastManager {
    expect_context::<ToastManager>()
}

/// Toast stack, rendered once near the root
#[component]
pub fn ToastContainer() -> impl IntoView {
    let manager = use_toasts();

    view! {
        <div class="toast-stack">
            <For
                each=move || manager.toasts().get()
                key=|toast| toast.id
                children=move |toast| view! { <ToastView toast=toast manager=manager /> }
            />
        </div>
    }
}

#[component]
fn ToastView(toast: Toast, manager: ToastManager) -> impl IntoView {
    let id = toast.id;
    let (is_exiting, _set_is_exiting) = signal(false);

    if let Some(_ms) = toast.auto_dismiss_ms {
        #[cfg(feature = "hydrate")]
        {
            use gloo_timers::future::TimeoutFuture;
            use leptos::task::spawn_local;

            spawn_local(async move {
                TimeoutFuture::new(_ms).await;
                _set_is_exiting.set(true);
                // Wait for exit animation
                TimeoutFuture::new(300).await;
                manager.dismiss(id);
            });
        }
    }

    view! {
        <div
            class=toast.kind.classes()
            class:toast-exiting=move || is_exiting.get()
            role="status"
        >
            <svg class="toast-icon" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=toast.kind.icon_path() />
            </svg>
            <div class="toast-body">
                <h4 class="toast-title">{toast.title}</h4>
                <p class="toast-message">{toast.message}</p>
            </div>
            <button class="toast-close" aria-label="Dismiss" on:click=move |_| manager.dismiss(id)>
                "×"
            </button>
        </div>
    }
}
