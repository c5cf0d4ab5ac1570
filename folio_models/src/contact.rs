use std::{collections::BTreeMap, fmt};

use email_address::{EmailAddress, Options};
use nutype::nutype;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Minimum number of characters a message must contain.
pub const MESSAGE_MIN_LENGTH: usize = 10;
/// Maximum number of characters a message may contain.
pub const MESSAGE_MAX_LENGTH: usize = 4096;
/// Maximum number of characters of the author's name.
pub const NAME_MAX_LENGTH: usize = 256;

/// A validated contact message.
///
/// Every field can only hold a value that passed validation, so a
/// `ContactMessage` is always ready to be transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
    pub content: ContactMessageContent,
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = NAME_MAX_LENGTH),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = MESSAGE_MIN_LENGTH, len_char_max = MESSAGE_MAX_LENGTH),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

/// Raw, unvalidated contents of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContactMessageForm {
    /// Full name of the sender
    pub name: String,
    /// Email address the sender wants to be contacted at
    pub email: String,
    /// The message itself
    pub message: String,
}

impl ContactMessageForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }
}

impl From<ContactMessage> for ContactMessageForm {
    fn from(value: ContactMessage) -> Self {
        Self {
            name: value.name.into_inner(),
            email: value.email.to_string(),
            message: value.content.into_inner(),
        }
    }
}

/// The fields of the contact form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human readable reasons why individual fields of a contact form are
/// invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<ContactField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: ContactField, reason: impl Into<String>) {
        self.0.insert(field, reason.into());
    }

    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &str)> {
        self.0.iter().map(|(&field, reason)| (field, reason.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, reason)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl FromIterator<(ContactField, String)> for ValidationErrors {
    fn from_iter<T: IntoIterator<Item = (ContactField, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Plain addresses with a dotted domain only, i.e. no `Name <addr>` display
/// text and no IP literals.
fn email_options() -> Options {
    Options::default()
        .without_display_text()
        .without_domain_literal()
        .with_required_tld()
}

/// Validates the raw contents of a contact form.
///
/// All fields are checked, so the result reports every invalid field and not
/// just the first one. The function is pure and used by both the client and
/// the server.
pub fn validate_input(form: &ContactMessageForm) -> Result<ContactMessage, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = ContactMessageAuthorName::try_new(form.name.clone())
        .map_err(|err| {
            let reason = match err {
                ContactMessageAuthorNameError::NotEmptyViolated => "Name is required".to_owned(),
                ContactMessageAuthorNameError::LenCharMaxViolated => {
                    format!("Name must be at most {NAME_MAX_LENGTH} characters")
                }
            };
            errors.insert(ContactField::Name, reason);
        })
        .ok();

    let email = EmailAddress::parse_with_options(form.email.trim(), email_options())
        .map_err(|_| errors.insert(ContactField::Email, "Invalid email address"))
        .ok();

    let content = ContactMessageContent::try_new(form.message.clone())
        .map_err(|err| {
            let reason = match err {
                ContactMessageContentError::LenCharMinViolated => {
                    format!("Message must be at least {MESSAGE_MIN_LENGTH} characters")
                }
                ContactMessageContentError::LenCharMaxViolated => {
                    format!("Message must be at most {MESSAGE_MAX_LENGTH} characters")
                }
            };
            errors.insert(ContactField::Message, reason);
        })
        .ok();

    match (name, email, content) {
        (Some(name), Some(email), Some(content)) => Ok(ContactMessage {
            name,
            email,
            content,
        }),
        _ => Err(errors),
    }
}
