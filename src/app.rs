use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::core::routes::AppRoute;
use crate::ui::auth::{ProtectedRoute, PublicOnly, SessionRedirect, provide_auth_context};
use crate::ui::pages::{
    DashboardPage, LandingPage, LoginPage, ManageJobsPage, MyApplicationsPage, NotFoundPage,
    ProfilePage, RegisterPage,
};
use crate::ui::{Navbar, ToastContainer, provide_toasts};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let toasts = provide_toasts();
    provide_auth_context(toasts);

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/gigboard.css"/>
        <Title text="GigBoard"/>

        <Router>
            <SessionRedirect />
            <Navbar />
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <Route path=StaticSegment(AppRoute::Landing.segment()) view=LandingPage />
                <Route
                    path=StaticSegment(AppRoute::Login.segment())
                    view=|| view! { <PublicOnly><LoginPage /></PublicOnly> }
                />
                <Route
                    path=StaticSegment(AppRoute::Register.segment())
                    view=|| view! { <PublicOnly><RegisterPage /></PublicOnly> }
                />
                <Route
                    path=StaticSegment(AppRoute::Dashboard.segment())
                    view=|| view! {
                        <ProtectedRoute roles=AppRoute::Dashboard.allowed_roles()>
                            <DashboardPage />
                        </ProtectedRoute>
                    }
                />
                <Route
                    path=StaticSegment(AppRoute::Profile.segment())
                    view=|| view! {
                        <ProtectedRoute roles=AppRoute::Profile.allowed_roles()>
                            <ProfilePage />
                        </ProtectedRoute>
                    }
                />
                <Route
                    path=StaticSegment(AppRoute::MyApplications.segment())
                    view=|| view! {
                        <ProtectedRoute roles=AppRoute::MyApplications.allowed_roles()>
                            <MyApplicationsPage />
                        </ProtectedRoute>
                    }
                />
                <Route
                    path=StaticSegment(AppRoute::ManageJobs.segment())
                    view=|| view! {
                        <ProtectedRoute roles=AppRoute::ManageJobs.allowed_roles()>
                            <ManageJobsPage />
                        </ProtectedRoute>
                    }
                />
            </Routes>
        </Router>

        <ToastContainer />
    }
}
