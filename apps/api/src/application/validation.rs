//! Field validation for job applications.
//!
//! One rule per field, looked up through [`rule_for`]. The same table backs
//! both the authoritative submission check ([`validate_application`]) and the
//! advisory per-field check used while the applicant is typing
//! ([`validate_field`]).

use std::sync::OnceLock;

use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::models::application::{ApplicationFields, Field, FieldValue};

pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

pub const ACCEPTED_RESUME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

const MIN_PHONE_DIGITS: usize = 10;
const MIN_INTERACTIVE_NAME_CHARS: usize = 2;
const LINKEDIN_HOST: &str = "linkedin.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field: field.name().to_string(),
            message: message.into(),
        }
    }
}

/// `Interactive` is advisory feedback on a single field and is slightly
/// stricter on names; `Submission` is the gate in front of the remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Interactive,
    Submission,
}

/// A rule returns every violation it finds, in a fixed order.
pub type Rule = fn(Field, FieldValue<'_>, ValidationMode) -> Vec<String>;

pub fn rule_for(field: Field) -> Rule {
    match field {
        Field::FirstName | Field::LastName => check_name,
        Field::Email => check_email,
        Field::Phone => check_phone,
        Field::LinkedinUrl => check_linkedin_url,
        Field::CoverLetter => check_cover_letter,
        Field::Resume => check_resume,
    }
}

/// Runs every rule over the whole form and collects all violations.
/// An empty list means the application may be submitted.
pub fn validate_application(fields: &ApplicationFields) -> Vec<ValidationError> {
    Field::ALL
        .into_iter()
        .flat_map(|field| {
            rule_for(field)(field, fields.value(field), ValidationMode::Submission)
                .into_iter()
                .map(move |message| ValidationError::new(field, message))
        })
        .collect()
}

/// Checks one field and reports only its first violation.
pub fn validate_field(
    field: Field,
    value: FieldValue<'_>,
    mode: ValidationMode,
) -> Option<ValidationError> {
    rule_for(field)(field, value, mode)
        .into_iter()
        .next()
        .map(|message| ValidationError::new(field, message))
}

// ────────────────────────────────────────────────────────────────────────────
// Rules
// ────────────────────────────────────────────────────────────────────────────

fn check_name(field: Field, value: FieldValue<'_>, mode: ValidationMode) -> Vec<String> {
    let label = match field {
        Field::FirstName => "First",
        _ => "Last",
    };
    let Some(name) = present_text(value) else {
        return vec![format!("{label} name is required")];
    };
    if mode == ValidationMode::Interactive && name.chars().count() < MIN_INTERACTIVE_NAME_CHARS {
        return vec![format!(
            "{label} name must be at least {MIN_INTERACTIVE_NAME_CHARS} characters"
        )];
    }
    vec![]
}

fn check_email(_: Field, value: FieldValue<'_>, _: ValidationMode) -> Vec<String> {
    match present_text(value) {
        None => vec!["Email is required".to_string()],
        Some(email) if !is_valid_email(email) => {
            vec!["Please enter a valid email address".to_string()]
        }
        Some(_) => vec![],
    }
}

fn check_phone(_: Field, value: FieldValue<'_>, _: ValidationMode) -> Vec<String> {
    match present_text(value) {
        None => vec!["Phone number is required".to_string()],
        Some(phone) if phone_digit_count(phone) < MIN_PHONE_DIGITS => vec![format!(
            "Phone number must be at least {MIN_PHONE_DIGITS} digits"
        )],
        Some(_) => vec![],
    }
}

fn check_linkedin_url(_: Field, value: FieldValue<'_>, _: ValidationMode) -> Vec<String> {
    let Some(raw) = present_text(value) else {
        return vec![];
    };
    match Url::parse(raw) {
        Err(_) => vec!["Please enter a valid URL".to_string()],
        Ok(url) if !is_linkedin_host(url.host_str()) => {
            vec!["Please enter a valid LinkedIn URL".to_string()]
        }
        Ok(_) => vec![],
    }
}

fn check_cover_letter(_: Field, _: FieldValue<'_>, _: ValidationMode) -> Vec<String> {
    vec![]
}

fn check_resume(_: Field, value: FieldValue<'_>, _: ValidationMode) -> Vec<String> {
    let FieldValue::File { content_type, size } = value else {
        return vec!["Resume is required".to_string()];
    };

    let mut violations = Vec::new();
    if !is_accepted_resume_type(content_type) {
        violations.push("Resume must be PDF, DOC, or DOCX format".to_string());
    }
    if size > MAX_RESUME_BYTES {
        violations.push("Resume file size must be less than 5MB".to_string());
    }
    violations
}

// ────────────────────────────────────────────────────────────────────────────
// Predicates
// ────────────────────────────────────────────────────────────────────────────

/// Trimmed text, or `None` when the field is missing, blank, or not text.
fn present_text(value: FieldValue<'_>) -> Option<&str> {
    match value {
        FieldValue::Text(text) => Some(text.trim()).filter(|t| !t.is_empty()),
        FieldValue::Missing | FieldValue::File { .. } => None,
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

pub fn phone_digit_count(phone: &str) -> usize {
    phone.chars().filter(|c| c.is_ascii_digit()).count()
}

fn is_linkedin_host(host: Option<&str>) -> bool {
    match host {
        Some(host) => {
            host == LINKEDIN_HOST
                || host
                    .strip_suffix(LINKEDIN_HOST)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        }
        None => false,
    }
}

pub fn is_accepted_resume_type(content_type: &str) -> bool {
    // Browsers occasionally append parameters, e.g. `application/pdf; charset=binary`.
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    ACCEPTED_RESUME_TYPES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(essence))
}
