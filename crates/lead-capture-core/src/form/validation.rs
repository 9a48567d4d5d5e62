//! Submit-time validation of the contact form

use regex::Regex;
use std::sync::OnceLock;

use super::{FieldErrors, FormField, FormState};

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MESSAGE_REQUIRED: &str = "Please tell us about your automation needs";
pub const MESSAGE_TOO_SHORT: &str = "Please provide more details (at least 10 characters)";

/// Minimum trimmed message length, in characters
pub const MIN_MESSAGE_LEN: usize = 10;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"(?i-u)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("email pattern is valid")
    })
}

/// Whether `value` looks like `local@domain.tld`
///
/// The value is matched as given; surrounding whitespace makes it invalid.
pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Validate the form, returning an empty map when it can be submitted
///
/// Only firstName, lastName, email and message are checked. The remaining
/// fields are optional and never produce errors.
pub fn validate(state: &FormState) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if state.first_name.trim().is_empty() {
        errors.insert(FormField::FirstName, FIRST_NAME_REQUIRED);
    }

    if state.last_name.trim().is_empty() {
        errors.insert(FormField::LastName, LAST_NAME_REQUIRED);
    }

    if state.email.trim().is_empty() {
        errors.insert(FormField::Email, EMAIL_REQUIRED);
    } else if !is_valid_email(&state.email) {
        errors.insert(FormField::Email, EMAIL_INVALID);
    }

    let message = state.message.trim();
    if message.is_empty() {
        errors.insert(FormField::Message, MESSAGE_REQUIRED);
    } else if message.chars().count() < MIN_MESSAGE_LEN {
        errors.insert(FormField::Message, MESSAGE_TOO_SHORT);
    }

    errors
}
