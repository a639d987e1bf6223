//! Common reusable UI components
//!
//! Form fields, spinners and inline messages shared by the pages.

pub mod form;
pub mod message;
pub mod spinner;

pub use form::{FormField, SelectField, TextAreaField, field_error};
pub use message::{EmptyState, ErrorMessage, SuccessMessage};
pub use spinner::{InlineSpinner, LoadingScreen, Spinner, SpinnerSize};
