//! Validated free-text fields.
//!
//! Values are trimmed before validation and lengths are counted in Unicode
//! scalar values. Field validation runs before any access decision.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;

/// Maximum length of list titles, item titles and group names.
pub const TITLE_MAX: usize = 255;
/// Maximum length of a group description.
pub const GROUP_DESCRIPTION_MAX: usize = 1000;
/// Maximum length of a comment.
pub const COMMENT_TEXT_MAX: usize = 5000;
/// Maximum length of a display name.
pub const DISPLAY_NAME_MAX: usize = 255;

/// The rule a field value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldViolation {
    /// Missing or blank after trimming.
    Required,
    /// Longer than the allowed maximum.
    TooLong { max: usize },
    /// Structurally malformed (for example an email without `@`).
    InvalidFormat,
}

/// Field-level contract violation, reported as `InvalidRequest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValidationError {
    field: &'static str,
    violation: FieldViolation,
}

impl FieldValidationError {
    /// Record a violation for `field`.
    pub const fn new(field: &'static str, violation: FieldViolation) -> Self {
        Self { field, violation }
    }

    /// Wire name of the offending field.
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// The broken rule.
    pub const fn violation(&self) -> FieldViolation {
        self.violation
    }

    /// Stable machine-readable code for the violation.
    pub const fn code(&self) -> &'static str {
        match self.violation {
            FieldViolation::Required => "required",
            FieldViolation::TooLong { .. } => "too_long",
            FieldViolation::InvalidFormat => "invalid_format",
        }
    }
}

impl fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violation {
            FieldViolation::Required => write!(f, "{} is required", self.field),
            FieldViolation::TooLong { max } => {
                write!(f, "{} must be at most {max} characters", self.field)
            }
            FieldViolation::InvalidFormat => write!(f, "{} has an invalid format", self.field),
        }
    }
}

impl std::error::Error for FieldValidationError {}

impl From<FieldValidationError> for Error {
    fn from(value: FieldValidationError) -> Self {
        let mut details = json!({
            "field": value.field,
            "code": value.code(),
        });
        if let FieldViolation::TooLong { max } = value.violation {
            details["max"] = json!(max);
        }
        Self::invalid_request(value.to_string()).with_details(details)
    }
}

/// Trim `value` and enforce `1..=max` characters.
pub(crate) fn bounded(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, FieldValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldValidationError::new(field, FieldViolation::Required));
    }
    if trimmed.chars().count() > max {
        return Err(FieldValidationError::new(
            field,
            FieldViolation::TooLong { max },
        ));
    }
    Ok(trimmed.to_owned())
}

macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident { field: $field:literal, max: $max:expr }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the value.
            pub fn new(value: impl AsRef<str>) -> Result<Self, FieldValidationError> {
                bounded($field, value.as_ref(), $max).map(Self)
            }

            /// Borrow the validated text.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = FieldValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

bounded_text! {
    /// Title of a gift list.
    ListTitle { field: "title", max: TITLE_MAX }
}

bounded_text! {
    /// Title of a list item.
    ItemTitle { field: "title", max: TITLE_MAX }
}

bounded_text! {
    /// Name of a group.
    GroupName { field: "name", max: TITLE_MAX }
}

bounded_text! {
    /// Optional free-form group description.
    GroupDescription { field: "description", max: GROUP_DESCRIPTION_MAX }
}

bounded_text! {
    /// Body of a comment.
    CommentText { field: "text", max: COMMENT_TEXT_MAX }
}

bounded_text! {
    /// Human readable name chosen at activation.
    DisplayName { field: "displayName", max: DISPLAY_NAME_MAX }
}

impl GroupDescription {
    /// Treat a missing or blank description as absent.
    pub fn optional(value: Option<&str>) -> Result<Option<Self>, FieldValidationError> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => Self::new(text).map(Some),
        }
    }
}

/// Item description. Unbounded; blank input means "no description".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemDescription(String);

impl ItemDescription {
    /// Trim the input, dropping it when nothing is left.
    pub fn optional(value: Option<&str>) -> Option<Self> {
        value
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| Self(text.to_owned()))
    }

    /// Borrow the description text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
