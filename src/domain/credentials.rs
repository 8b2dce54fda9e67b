//! Credential validation for signup.
//!
//! Failures are reported per-field with human-readable messages, never as
//! a single aggregate error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::foundation::{FieldErrors, ValidationError};

/// Name length bounds.
pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;

/// Password length bounds.
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 50;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Raw signup form input.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Validates a signup form, collecting every failing field.
///
/// Rules: name 2-50 characters; email syntactically valid; password 8-50
/// characters containing at least one lowercase letter, one uppercase
/// letter, and one digit.
pub fn validate_signup(form: &SignupForm) -> Result<(), FieldErrors> {
    let mut fields = FieldErrors::new();

    let name_len = form.name.trim().chars().count();
    if name_len < NAME_MIN || name_len > NAME_MAX {
        fields.push(ValidationError::length_out_of_range(
            "name", NAME_MIN, NAME_MAX, name_len,
        ));
    }

    if !EMAIL_RE.is_match(form.email.trim()) {
        fields.push(ValidationError::invalid_format(
            "email",
            "must be a valid email address",
        ));
    }

    validate_password(&form.password, &mut fields);

    if fields.is_empty() {
        Ok(())
    } else {
        Err(fields)
    }
}

fn validate_password(password: &str, fields: &mut FieldErrors) {
    let len = password.chars().count();
    if len < PASSWORD_MIN || len > PASSWORD_MAX {
        fields.push(ValidationError::length_out_of_range(
            "password",
            PASSWORD_MIN,
            PASSWORD_MAX,
            len,
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        fields.push_message("password", "Password must contain a lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        fields.push_message("password", "Password must contain an uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        fields.push_message("password", "Password must contain a digit");
    }
}
