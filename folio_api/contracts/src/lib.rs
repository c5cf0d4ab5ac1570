//! The wire contract between the contact form and the server.
//!
//! Both sides depend on this crate, so the request and response shapes can
//! not drift apart.

use http::{Method, StatusCode};
use schemars::{schema::RootSchema, schema_for};

pub mod messages;

/// A single HTTP operation of the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
    /// The status code the server responds with on success
    pub success: StatusCode,
}

/// Returns the JSON schemas of all request and response bodies.
pub fn schemas() -> Vec<(&'static str, RootSchema)> {
    vec![
        (
            "CreateMessageRequest",
            schema_for!(messages::ApiCreateMessageRequest),
        ),
        ("MessageCreated", schema_for!(messages::ApiMessageCreated)),
        ("Error", schema_for!(messages::ApiError)),
    ]
}
