//! GigBoard - Freelance job board
//!
//! A Leptos single-page application where freelancers find and apply to hourly jobs
//! and recruiters post jobs and review applicants. All data lives in an external REST
//! backend; this crate holds the browser client and the host that serves it.
//!
//! - `core`: target-independent session, HTTP and domain logic
//! - `ui`: Leptos components built on top of `core`

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    // No tracing subscriber in the browser: core events fall through to `log`
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        leptos::logging::warn!("Console logger unavailable: {}", err);
    }
    leptos::mount::hydrate_body(App);
}
