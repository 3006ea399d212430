//! Field validation for the user form.
//!
//! Rules run on submit. Every failing field gets one message; a field with
//! several failing rules reports the first.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::users::UserDraft;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

static WEBSITE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(ftp|http|https)://[^ "]+$"#).unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Minimum length of name, username and company.
const MIN_LEN: usize = 3;

/// The editable fields of the user form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Username,
    Email,
    Phone,
    Website,
    Company,
    Street,
    City,
    Zipcode,
}

impl FormField {
    /// All fields in focus order.
    pub const ALL: [FormField; 9] = [
        FormField::Name,
        FormField::Username,
        FormField::Email,
        FormField::Phone,
        FormField::Website,
        FormField::Company,
        FormField::Street,
        FormField::City,
        FormField::Zipcode,
    ];

    /// Label shown on the input border.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name *",
            FormField::Username => "Username *",
            FormField::Email => "Email *",
            FormField::Phone => "Phone *",
            FormField::Website => "Website",
            FormField::Company => "Company",
            FormField::Street => "Street *",
            FormField::City => "City *",
            FormField::Zipcode => "Zipcode",
        }
    }
}

/// Whether the form creates a new user or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

/// Per-field validation messages.
pub type FieldErrors = BTreeMap<FormField, String>;

/// Derive a username from a display name: `user_` prefix, whitespace runs
/// collapsed to one underscore.
pub fn derive_username(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&format!("user_{}", name), "_")
        .into_owned()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Validate a draft. An empty map means the draft may be submitted.
///
/// The username is only checked when creating; in edit mode it is read-only.
pub fn validate(draft: &UserDraft, mode: FormMode) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.name.is_empty() {
        errors.insert(FormField::Name, "Name is required".to_string());
    } else if char_len(&draft.name) < MIN_LEN {
        errors.insert(
            FormField::Name,
            "Name must be at least 3 characters long".to_string(),
        );
    }

    if mode == FormMode::Create && char_len(&draft.username) < MIN_LEN {
        errors.insert(
            FormField::Username,
            "Username must be at least 3 characters long".to_string(),
        );
    }

    if draft.email.is_empty() {
        errors.insert(FormField::Email, "Email address is required".to_string());
    } else if !EMAIL_REGEX.is_match(&draft.email) {
        errors.insert(FormField::Email, "Email must be valid".to_string());
    }

    if draft.phone.is_empty() {
        errors.insert(FormField::Phone, "Phone number is required".to_string());
    } else if !PHONE_REGEX.is_match(&draft.phone) {
        errors.insert(FormField::Phone, "Phone must be a valid number".to_string());
    }

    if draft.street.is_empty() {
        errors.insert(FormField::Street, "Street name is required".to_string());
    }
    if draft.city.is_empty() {
        errors.insert(FormField::City, "City name is required".to_string());
    }

    if !draft.company.is_empty() && char_len(&draft.company) < MIN_LEN {
        errors.insert(
            FormField::Company,
            "If provided, Company Name must be at least 3 characters long".to_string(),
        );
    }

    if !draft.website.is_empty() && !WEBSITE_REGEX.is_match(&draft.website) {
        errors.insert(
            FormField::Website,
            "If provided, Website must be a valid URL".to_string(),
        );
    }

    errors
}
