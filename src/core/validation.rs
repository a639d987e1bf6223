//! Sign-up and sign-in form validation
//!
//! Mirrors the backend's own checks so obvious mistakes are caught before a round trip:
//! email must look like `local@domain.tld`, and passwords need length plus a mix of
//! character classes.

use crate::core::models::{ApplicationDraft, JobDraft};
use crate::core::session::{Credentials, Registration};

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that count as "special" in a password
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Validation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{} is required", field_label(.field))]
    Required { field: &'static str },

    #[error("{} must be a positive number", field_label(.field))]
    InvalidNumber { field: &'static str },

    #[error("Invalid email format")]
    InvalidEmail,

    /// All failed password rules, joined with ", "
    #[error("{0}")]
    WeakPassword(String),

    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl ValidationError {
    /// Form field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field } | ValidationError::InvalidNumber { field } => field,
            ValidationError::InvalidEmail => "email",
            ValidationError::WeakPassword(_) => "password",
            ValidationError::PasswordMismatch => "confirm_password",
        }
    }
}

/// Check the `local@domain.tld` shape: ASCII local part of `[A-Za-z0-9._%+-]`,
/// domain of `[A-Za-z0-9.-]`, and an alphabetic TLD of two or more letters.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required { field: "email" });
    }

    let (local, domain) = email.split_once('@').ok_or(ValidationError::InvalidEmail)?;
    let (host, tld) = domain.rsplit_once('.').ok_or(ValidationError::InvalidEmail)?;

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());

    if local_ok && host_ok && tld_ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Check password strength, reporting every failed rule at once
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Required { field: "password" });
    }

    let mut problems = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        problems.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        problems.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Password must contain at least one number");
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        problems.push("Password must contain at least one special character");
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword(problems.join(", ")))
    }
}

/// "first_name" -> "First name"
fn field_label(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

/// Parse an optional positive decimal form input. Blank input is `None`.
pub fn parse_positive_decimal(raw: &str, field: &'static str) -> Result<Option<f64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(Some(value)),
        _ => Err(ValidationError::InvalidNumber { field }),
    }
}

/// Split a comma separated list, dropping blanks
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

impl Credentials {
    /// Both fields present. Password strength is not checked at sign-in.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.email, "email")?;
        require(&self.password, "password")
    }
}

impl Registration {
    /// Required fields, email shape and password strength, in form order
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.username, "username")?;
        require(&self.first_name, "first_name")?;
        require(&self.last_name, "last_name")?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }

    /// Validate together with the confirmation field of the sign-up form
    pub fn validate_with_confirmation(&self, confirm_password: &str) -> Result<(), ValidationError> {
        self.validate()?;
        if self.password != confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

impl JobDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.title, "title")?;
        require(&self.description, "description")?;
        if !(self.pay_per_hour.is_finite() && self.pay_per_hour > 0.0) {
            return Err(ValidationError::InvalidNumber { field: "pay_per_hour" });
        }
        Ok(())
    }
}

impl ApplicationDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.cover_letter, "cover_letter")?;
        match self.proposed_rate {
            Some(rate) if !(rate.is_finite() && rate > 0.0) => {
                Err(ValidationError::InvalidNumber { field: "proposed_rate" })
            }
            _ => Ok(()),
        }
    }
}
