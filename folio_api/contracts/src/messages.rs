use chrono::{DateTime, Utc};
use folio_models::{
    contact::{ContactField, ContactMessage, ContactMessageForm, ValidationErrors},
    message::StoredMessage,
};
use http::{Method, StatusCode};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::Endpoint;

/// Submit a new contact message.
pub const CREATE_MESSAGE: Endpoint = Endpoint {
    method: Method::POST,
    path: "/api/messages",
    success: StatusCode::CREATED,
};

/// Fallback used whenever the server did not provide a usable reason.
pub const GENERIC_ERROR_MESSAGE: &str = "Failed to send message";

/// Request body of [`CREATE_MESSAGE`].
///
/// Missing fields deserialize to empty strings so the server can report them
/// through the regular per-field validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ApiCreateMessageRequest {
    /// Full name of the sender
    pub name: String,
    /// Email address of the sender
    pub email: String,
    /// Content of the message (at least 10 characters)
    pub message: String,
}

impl From<&ContactMessage> for ApiCreateMessageRequest {
    fn from(value: &ContactMessage) -> Self {
        Self {
            name: value.name.to_string(),
            email: value.email.to_string(),
            message: value.content.to_string(),
        }
    }
}

impl From<ApiCreateMessageRequest> for ContactMessageForm {
    fn from(value: ApiCreateMessageRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            message: value.message,
        }
    }
}

/// Success response of [`CREATE_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiMessageCreated {
    /// Opaque identifier of the accepted message
    pub id: String,
    /// Time at which the server accepted the message
    pub created_at: DateTime<Utc>,
}

impl From<&StoredMessage> for ApiMessageCreated {
    fn from(value: &StoredMessage) -> Self {
        Self {
            id: value.id.to_string(),
            created_at: value.created_at,
        }
    }
}

/// Error response of every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ApiError {
    /// Human readable reason
    pub message: String,
    /// Reasons for individual invalid fields, if any
    #[serde(
        default,
        skip_serializing_if = "ValidationErrors::is_empty",
        deserialize_with = "deserialize_fields"
    )]
    #[schemars(with = "ValidationErrors")]
    pub fields: ValidationErrors,
}

/// Keeps the reasons for known fields and drops everything else, so a
/// server that reports more (or differently shaped) fields still gets its
/// message through.
fn deserialize_fields<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<ValidationErrors, D::Error> {
    let Some(Value::Object(fields)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(ValidationErrors::default());
    };
    Ok(fields
        .into_iter()
        .filter_map(|(field, reason)| {
            let field = ContactField::deserialize(Value::String(field)).ok()?;
            match reason {
                Value::String(reason) => Some((field, reason)),
                _ => None,
            }
        })
        .collect())
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: ValidationErrors::default(),
        }
    }
}

impl From<&str> for ApiError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ApiError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(fields: ValidationErrors) -> Self {
        Self {
            message: fields.to_string(),
            fields,
        }
    }
}

/// Parses the body of a successful [`CREATE_MESSAGE`] response.
pub fn parse_success_response(body: &[u8]) -> serde_json::Result<ApiMessageCreated> {
    serde_json::from_slice(body)
}

/// Parses the body of an error response.
///
/// Returns `None` if the body is not a valid error envelope or does not
/// contain a message.
pub fn parse_error_response(body: &[u8]) -> Option<ApiError> {
    serde_json::from_slice::<ApiError>(body)
        .ok()
        .filter(|err| !err.message.trim().is_empty())
}
