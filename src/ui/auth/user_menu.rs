//! User menu component
//!
//! Header widget: sign-in links for visitors, avatar with a dropdown for signed-in users.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use super::context::use_auth_context;
use crate::core::routes::AppRoute;
use crate::core::session::{AuthState, User};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::use_toasts;

/// User menu component for the header
#[component]
pub fn UserMenu() -> impl IntoView {
    let auth = use_auth_context();
    let toasts = use_toasts();
    let navigate = use_navigate();
    let menu_open = RwSignal::new(false);

    let handle_logout = move |_: leptos::ev::MouseEvent| {
        menu_open.set(false);
        let navigate = navigate.clone();
        spawn_local(async move {
            auth.logout().await;
            toasts.info("Signed out", "See you next time");
            navigate(AppRoute::Login.path(), Default::default());
        });
    };

    move || match auth.state.get() {
        AuthState::Unknown => view! { <div class="avatar avatar-placeholder"></div> }.into_any(),
        AuthState::Unauthenticated => view! {
            <div class="user-menu-links">
                <A href=AppRoute::Login.path() attr:class="btn btn-ghost">"Sign In"</A>
                <A href=AppRoute::Register.path() attr:class="btn btn-primary">"Sign Up"</A>
            </div>
        }
        .into_any(),
        AuthState::Authenticated(user) => {
            let handle_logout = handle_logout.clone();
            let role = user.role.display_name();
            let name = user.display_name();
            let email = user.email.clone();

            view! {
                <div class="user-menu">
                    <button class="user-menu-trigger" on:click=move |_| menu_open.update(|v| *v = !*v)>
                        <UserAvatar user=user.clone() />
                        <span class="user-menu-name">{name.clone()}</span>
                    </button>

                    <Show when=move || menu_open.get()>
                        <div class="user-menu-dropdown">
                            <div class="user-menu-header">
                                <p class="user-menu-title">{name.clone()}</p>
                                <p class="user-menu-subtitle">{email.clone()}</p>
                                <span class="role-badge">{role}</span>
                            </div>
                            <A href=AppRoute::Profile.path() attr:class="user-menu-item" on:click=move |_| menu_open.set(false)>
                                <Icon name=icons::USER class="icon-text" />
                                "Profile"
                            </A>
                            <button class="user-menu-item user-menu-danger" on:click=handle_logout.clone()>
                                <Icon name=icons::LOGOUT class="icon-text" />
                                "Sign Out"
                            </button>
                        </div>
                    </Show>
                </div>
            }
            .into_any()
        }
    }
}

/// Round badge with the user's initial
#[component]
pub fn UserAvatar(user: User) -> impl IntoView {
    // Stable color per user
    let hash = user
        .username
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_add(b as u32));
    let palette = ["avatar-blue", "avatar-green", "avatar-amber", "avatar-rose", "avatar-teal"];
    let color = palette[(hash as usize) % palette.len()];

    view! {
        <div class=format!("avatar {color}") title=user.display_name()>
            {user.initial().to_string()}
        </div>
    }
}
