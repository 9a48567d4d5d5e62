//! Contact form data model
//!
//! [`FormState`] holds the raw field values exactly as the visitor typed them.
//! [`FieldErrors`] holds the per-field messages produced by [`validate`].
//! Wire names are camelCase, matching the payload the webhook receives.

pub mod honeypot;
pub mod validation;

pub use honeypot::is_bot;
pub use validation::validate;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::LeadError;

/// Shown next to the form after the webhook accepted a lead
pub const SUCCESS_MESSAGE: &str = "Thank you! We'll get back to you within 24 hours.";

/// Shown when the webhook request failed
pub const FAILURE_NOTICE: &str =
    "Failed to submit form. Please try again or contact us directly.";

/// Submit button label while idle
pub const SUBMIT_LABEL_IDLE: &str = "Get My Free Consultation";

/// Submit button label while a request is outstanding
pub const SUBMIT_LABEL_BUSY: &str = "Sending Your Message...";

/// Every field on the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
    CompanySize,
    Message,
    /// Honeypot. Never rendered visibly.
    Website,
}

impl FormField {
    /// All fields in payload order
    pub const ALL: [FormField; 8] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Phone,
        FormField::Company,
        FormField::CompanySize,
        FormField::Message,
        FormField::Website,
    ];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Company => "company",
            FormField::CompanySize => "companySize",
            FormField::Message => "message",
            FormField::Website => "website",
        }
    }

    /// Whether the field must be filled in before submitting
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            FormField::FirstName | FormField::LastName | FormField::Email | FormField::Message
        )
    }

    /// Whether this is the hidden bot trap
    pub fn is_honeypot(&self) -> bool {
        matches!(self, FormField::Website)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| LeadError::invalid_input(format!("Unknown form field: {}", s)))
    }
}

/// Current values of the contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub company_size: String,
    pub message: String,
    pub website: String,
}

impl FormState {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a field value
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Company => &self.company,
            FormField::CompanySize => &self.company_size,
            FormField::Message => &self.message,
            FormField::Website => &self.website,
        }
    }

    /// Overwrite a field value
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Company => &mut self.company,
            FormField::CompanySize => &mut self.company_size,
            FormField::Message => &mut self.message,
            FormField::Website => &mut self.website,
        };
        *slot = value.into();
    }

    /// Builder-style setter, handy for fixtures
    pub fn with(mut self, field: FormField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// True when every field is still empty
    pub fn is_pristine(&self) -> bool {
        *self == FormState::default()
    }
}

/// Validation messages keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop the error for one field, returning it if present
    pub fn clear(&mut self, field: FormField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields that currently carry an error, in payload order
    pub fn fields(&self) -> Vec<FormField> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// Company size bands offered by the form's select control
///
/// `companySize` stays a free string on [`FormState`]; these are the values the
/// front end offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySize {
    Micro,
    Small,
    Medium,
    Large,
    Enterprise,
    Corporate,
}

impl CompanySize {
    pub const ALL: [CompanySize; 6] = [
        CompanySize::Micro,
        CompanySize::Small,
        CompanySize::Medium,
        CompanySize::Large,
        CompanySize::Enterprise,
        CompanySize::Corporate,
    ];

    /// Value stored in `companySize`
    pub fn value(&self) -> &'static str {
        match self {
            CompanySize::Micro => "1-10",
            CompanySize::Small => "11-50",
            CompanySize::Medium => "51-200",
            CompanySize::Large => "201-500",
            CompanySize::Enterprise => "501-1000",
            CompanySize::Corporate => "1000+",
        }
    }

    /// Human label for the select option
    pub fn label(&self) -> &'static str {
        match self {
            CompanySize::Micro => "1-10 employees",
            CompanySize::Small => "11-50 employees",
            CompanySize::Medium => "51-200 employees",
            CompanySize::Large => "201-500 employees",
            CompanySize::Enterprise => "501-1000 employees",
            CompanySize::Corporate => "1000+ employees",
        }
    }

    /// Look up a band by its stored value
    pub fn from_value(value: &str) -> Option<Self> {
        CompanySize::ALL.iter().copied().find(|s| s.value() == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in FormField::ALL {
            assert_eq!(field.as_str().parse::<FormField>().unwrap(), field);
        }
        assert!("fax".parse::<FormField>().is_err());
        assert!("first_name".parse::<FormField>().is_err());
    }

    #[test]
    fn test_required_fields() {
        let required: Vec<_> = FormField::ALL.iter().filter(|f| f.is_required()).collect();
        assert_eq!(
            required,
            vec![
                &FormField::FirstName,
                &FormField::LastName,
                &FormField::Email,
                &FormField::Message
            ]
        );
        assert!(FormField::Website.is_honeypot());
        assert!(!FormField::Website.is_required());
    }

    #[test]
    fn test_payload_has_all_keys_as_strings() {
        let state = FormState::new().with(FormField::FirstName, "John");
        let value = serde_json::to_value(&state).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 8);
        for field in FormField::ALL {
            assert!(obj[field.as_str()].is_string(), "{} missing", field);
        }
        assert_eq!(obj["firstName"], "John");
        assert_eq!(obj["website"], "");
    }

    #[test]
    fn test_deserialize_tolerates_missing_keys() {
        let state: FormState =
            serde_json::from_str(r#"{"email": "john@x.com", "companySize": "11-50"}"#).unwrap();
        assert_eq!(state.email, "john@x.com");
        assert_eq!(state.company_size, "11-50");
        assert_eq!(state.first_name, "");
    }

    #[test]
    fn test_get_set() {
        let mut state = FormState::new();
        assert!(state.is_pristine());
        state.set(FormField::Company, "Acme");
        assert_eq!(state.get(FormField::Company), "Acme");
        assert!(!state.is_pristine());
    }

    #[test]
    fn test_field_errors_serialize_by_wire_name() {
        let mut errors = FieldErrors::new();
        errors.insert(FormField::LastName, "Last name is required");
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"lastName":"Last name is required"}"#);
    }

    #[test]
    fn test_company_sizes() {
        assert_eq!(CompanySize::ALL.len(), 6);
        assert_eq!(CompanySize::from_value("1000+"), Some(CompanySize::Corporate));
        assert_eq!(CompanySize::Medium.label(), "51-200 employees");
        assert_eq!(CompanySize::from_value("7"), None);
    }
}
