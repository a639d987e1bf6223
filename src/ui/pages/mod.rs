//! Application pages module
//!
//! One component per `AppRoute`; access rules are applied by the router in `app.rs`.

mod dashboard;
mod landing;
mod login;
mod manage_jobs;
mod my_applications;
mod not_found;
mod profile;
mod register;

pub use dashboard::DashboardPage;
pub use landing::LandingPage;
pub use login::LoginPage;
pub use manage_jobs::ManageJobsPage;
pub use my_applications::MyApplicationsPage;
pub use not_found::NotFoundPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
