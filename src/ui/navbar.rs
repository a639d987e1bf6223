//! Top navigation bar
//!
//! Role links for signed-in users, the unread notification badge with its dropdown,
//! and the user menu.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::core::api::NotificationApi;
use crate::core::models::Notification;
use crate::core::routes::AppRoute;
use crate::ui::auth::{UserMenu, use_auth_context};
use crate::ui::common::{EmptyState, InlineSpinner};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::use_toasts;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth_context();

    let links = move || {
        auth.role()
            .map(AppRoute::nav_links)
            .unwrap_or_default()
            .into_iter()
            .map(|route| {
                view! {
                    <A href=route.path() attr:class="nav-link">{route.title()}</A>
                }
            })
            .collect_view()
    };

    view! {
        <header class="navbar">
            <A href=AppRoute::Landing.path() attr:class="navbar-brand">
                <Icon name=icons::BRIEFCASE class="icon-brand" />
                "GigBoard"
            </A>
            <nav class="navbar-links">{links}</nav>
            <div class="navbar-actions">
                <Show when=move || auth.is_authenticated()>
                    <NotificationBell />
                </Show>
                <UserMenu />
            </div>
        </header>
    }
}

/// Bell with the unread count, refreshed on a timer while signed in
#[component]
fn NotificationBell() -> impl IntoView {
    let auth = use_auth_context();
    let unread = RwSignal::new(0u32);
    let open = RwSignal::new(false);

    let refresh_count = move || {
        let client = auth.client();
        spawn_local(async move {
            match NotificationApi::new(&client).unread_count().await {
                Ok(count) => unread.set(count),
                Err(err) => leptos::logging::warn!("Unread count unavailable: {}", err),
            }
        });
    };

    #[cfg(feature = "hydrate")]
    {
        use gloo_timers::callback::Interval;

        let interval_ms = auth
            .client()
            .config()
            .unread_poll_interval_ms;
        refresh_count();
        let timer = StoredValue::new_local(Some(Interval::new(interval_ms, refresh_count)));
        on_cleanup(move || {
            // Dropping the interval cancels it
            timer.try_update_value(|timer| timer.take());
        });
    }

    view! {
        <div class="notification-bell">
            <button
                class="btn-icon"
                aria-label="Notifications"
                on:click=move |_| open.update(|v| *v = !*v)
            >
                <Icon name=icons::BELL class="icon-text" />
                {move || {
                    let count = unread.get();
                    (count > 0).then(|| {
                        let label = if count > 99 { "99+".to_string() } else { count.to_string() };
                        view! { <span class="badge">{label}</span> }
                    })
                }}
            </button>
            <Show when=move || open.get()>
                <NotificationPanel on_change=Callback::new(move |_| refresh_count()) />
            </Show>
        </div>
    }
}

/// Dropdown listing recent notifications
#[component]
fn NotificationPanel(on_change: Callback<()>) -> impl IntoView {
    let auth = use_auth_context();
    let toasts = use_toasts();

    let items = RwSignal::new(Vec::<Notification>::new());
    let loading = RwSignal::new(true);
    let reload = RwSignal::new(0u32);

    Effect::new(move |_| {
        reload.track();
        let client = auth.client();
        spawn_local(async move {
            loading.set(true);
            // Failures already surface as toasts
            if let Ok(list) = NotificationApi::new(&client).list(false).await {
                items.set(list);
            }
            loading.set(false);
        });
    });

    let mark_read = move |id: i64| {
        let client = auth.client();
        spawn_local(async move {
            if NotificationApi::new(&client).mark_read(id).await.is_ok() {
                items.update(|list| {
                    if let Some(item) = list.iter_mut().find(|n| n.id == id) {
                        item.is_read = true;
                    }
                });
                on_change.run(());
            }
        });
    };

    let mark_all_read = move |_: leptos::ev::MouseEvent| {
        let client = auth.client();
        spawn_local(async move {
            if NotificationApi::new(&client).mark_all_read().await.is_ok() {
                toasts.success("Notifications", "All notifications marked as read");
                reload.update(|n| *n += 1);
                on_change.run(());
            }
        });
    };

    view! {
        <div class="notification-panel">
            <div class="notification-panel-header">
                <span>"Notifications"</span>
                <button class="btn-link" on:click=mark_all_read>"Mark all read"</button>
            </div>
            {move || {
                if loading.get() {
                    view! { <div class="notification-panel-loading"><InlineSpinner /></div> }.into_any()
                } else if items.with(Vec::is_empty) {
                    view! { <EmptyState title="You're all caught up" /> }.into_any()
                } else {
                    items
                        .get()
                        .into_iter()
                        .map(|item| {
                            let id = item.id;
                            view! {
                                <div class="notification-item" class:notification-unread=!item.is_read>
                                    <div class="notification-item-body">
                                        <p class="notification-item-title">{item.title}</p>
                                        <p class="notification-item-message">{item.message}</p>
                                    </div>
                                    {(!item.is_read).then(|| view! {
                                        <button
                                            class="btn-icon"
                                            aria-label="Mark as read"
                                            on:click=move |_| mark_read(id)
                                        >
                                            <Icon name=icons::CHECK class="icon-text" />
                                        </button>
                                    })}
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}
