//! Input validation for the HTML forms.
//!
//! Each form deserializes from an `application/x-www-form-urlencoded` body
//! with every field optional, so a missing field becomes a validation error
//! on the page instead of a rejected request.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

mod client;
mod entry;
mod login;
mod project;

pub use client::ClientForm;
pub use entry::EntryForm;
pub use login::{safe_next, LoginForm};
pub use project::ProjectForm;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";
pub const INVALID_DATETIME: &str = "Enter a valid date/time.";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Field-level error messages, keyed by field name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
    non_field: Vec<String>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    /// `Ok(value)` if nothing was recorded.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Trimmed, required text of at most `max_len` characters.
pub(crate) fn required_text(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Option<String> {
    let value = value.trim();
    let len = value.chars().count();
    if value.is_empty() {
        errors.add(field, REQUIRED);
        None
    } else if len > max_len {
        errors.add(
            field,
            format!("Ensure this value has at most {max_len} characters (it has {len})."),
        );
        None
    } else {
        Some(value.to_string())
    }
}

/// An id from a `<select>` that must be one of `choices`.
pub(crate) fn choice(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    choices: &[i64],
) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    match value.parse::<i64>() {
        Ok(id) if choices.contains(&id) => Some(id),
        _ => {
            errors.add(field, INVALID_CHOICE);
            None
        }
    }
}

pub(crate) fn required_datetime(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    let parsed = parse_datetime(value);
    if parsed.is_none() {
        errors.add(field, INVALID_DATETIME);
    }
    parsed
}

pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
