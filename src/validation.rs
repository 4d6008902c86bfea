//! Form schemas for the login and register pages.
//!
//! [`validate_field`] checks one field and is what the pages call on every
//! change; [`Schema::validate`] runs the same checks over a submitted form.

use crate::strength::char_count;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

pub const INVALID_EMAIL: &str = "Invalid email";
pub const INVALID_PASSWORD: &str =
    "Password must contain at least 8 characters, one letter and one number";
pub const REQUIRED: &str = "Required";
pub const UNKNOWN_FIELD: &str = "Unknown field";

/// Shortest password the forms accept.
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Password,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "password" => Ok(Self::Password),
            _ => Err(format!("unknown field: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    Login,
    Register,
}

impl Schema {
    /// Fields in the order the form shows them.
    #[must_use]
    pub const fn fields(self) -> &'static [Field] {
        match self {
            Self::Login => &[Field::Email, Field::Password],
            Self::Register => &[Field::Name, Field::Email, Field::Password],
        }
    }

    #[must_use]
    pub fn has(self, field: Field) -> bool {
        self.fields().contains(&field)
    }

    /// Validates every field of the schema. Missing fields are reported as
    /// [`REQUIRED`].
    ///
    /// # Errors
    /// Returns the message of each failing field.
    pub fn validate(self, input: &FormInput) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        for &field in self.fields() {
            let outcome = match input.get(field) {
                Some(value) => validate_field(self, field, value),
                None => Err(REQUIRED.to_string()),
            };
            if let Err(message) = outcome {
                errors.insert(field, message);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl FromStr for Schema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Self::Login),
            "register" => Ok(Self::Register),
            _ => Err(format!("unknown schema: {s}")),
        }
    }
}

/// Raw values from a submitted form. A field the browser did not send is
/// `None`, which is not the same as an empty string.
#[derive(Clone, Default, Deserialize)]
pub struct FormInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl FormInput {
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Password => self.password.as_deref(),
        }
    }
}

impl fmt::Debug for FormInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Per-field error messages, keyed by field name when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: Field, message: String) {
        self.0.insert(field, message);
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Validates a single field of `schema`.
///
/// # Errors
/// Returns the message to show next to the field.
pub fn validate_field(schema: Schema, field: Field, value: &str) -> Result<(), String> {
    if !schema.has(field) {
        return Err(UNKNOWN_FIELD.to_string());
    }

    match field {
        Field::Name => Ok(()),
        Field::Email if valid_email(value) => Ok(()),
        Field::Email => Err(INVALID_EMAIL.to_string()),
        Field::Password if valid_password(value) => Ok(()),
        Field::Password => Err(INVALID_PASSWORD.to_string()),
    }
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// At least [`MIN_PASSWORD_LENGTH`] UTF-16 units on a single line, with an
/// ASCII letter, an ASCII digit and something that is neither.
#[must_use]
pub fn valid_password(password: &str) -> bool {
    let single_line = !password
        .chars()
        .any(|c| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'));

    single_line
        && char_count(password) >= MIN_PASSWORD_LENGTH
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}
