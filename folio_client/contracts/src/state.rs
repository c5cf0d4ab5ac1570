//! Lifecycle of a single submission of the contact form.
//!
//! ```text
//! Idle --Submitted--> Pending --Accepted--> Success
//!   |                    '------Failed----> Error
//!   '-------Invalid-------------------------^
//! ```
//!
//! `Success` and `Error` are terminal. A new submission starts over from
//! `Idle`.

use folio_api_contracts::messages::ApiMessageCreated;
use folio_models::contact::ValidationErrors;
use thiserror::Error;

use crate::api::CreateMessageError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Success(ApiMessageCreated),
    Error(SubmissionError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    /// The input was valid and the request has been issued.
    Submitted,
    /// The input failed local validation; no request is issued.
    Invalid(ValidationErrors),
    /// The server accepted the message.
    Accepted(ApiMessageCreated),
    /// The request failed.
    Failed(SubmissionError),
}

/// Reasons a submission ended in [`SubmissionState::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Local validation failed.
    #[error("{0}")]
    Invalid(ValidationErrors),
    /// The server rejected the message with a reason.
    #[error("{message}")]
    Rejected {
        message: String,
        fields: ValidationErrors,
    },
    /// Network failure, server fault or unexpected response.
    #[error("Failed to send message")]
    Failed,
}

impl SubmissionError {
    /// Reasons for individual fields, if the error is about specific fields.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(fields) => Some(fields),
            Self::Rejected { fields, .. } if !fields.is_empty() => Some(fields),
            Self::Rejected { .. } | Self::Failed => None,
        }
    }
}

impl From<CreateMessageError> for SubmissionError {
    fn from(value: CreateMessageError) -> Self {
        match value {
            CreateMessageError::Rejected(err) => Self::Rejected {
                message: err.message,
                fields: err.fields,
            },
            CreateMessageError::Other(_) => Self::Failed,
        }
    }
}

/// Computes the state that follows `state` when `event` happens.
///
/// Returns `None` if the event is not allowed in the given state.
pub fn transition(state: &SubmissionState, event: SubmissionEvent) -> Option<SubmissionState> {
    use SubmissionEvent as E;
    use SubmissionState as S;

    match (state, event) {
        (S::Idle, E::Submitted) => Some(S::Pending),
        (S::Idle, E::Invalid(errors)) => Some(S::Error(SubmissionError::Invalid(errors))),
        (S::Pending, E::Accepted(created)) => Some(S::Success(created)),
        (S::Pending, E::Failed(err)) => Some(S::Error(err)),
        _ => None,
    }
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    pub fn error(&self) -> Option<&SubmissionError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Human readable message of the latest error, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        self.error().and_then(SubmissionError::field_errors)
    }

    /// Label of the form's submit button.
    pub fn submit_label(&self) -> &'static str {
        if self.is_pending() {
            "Sending..."
        } else {
            "Send Message"
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use folio_api_contracts::messages::{ApiError, GENERIC_ERROR_MESSAGE};
    use folio_models::contact::ContactField;
    use folio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn created() -> ApiMessageCreated {
        ApiMessageCreated {
            id: "abc".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn errors() -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.insert(ContactField::Name, "Name is required");
        errors
    }

    fn states() -> [SubmissionState; 4] {
        [
            SubmissionState::Idle,
            SubmissionState::Pending,
            SubmissionState::Success(created()),
            SubmissionState::Error(SubmissionError::Failed),
        ]
    }

    fn events() -> [SubmissionEvent; 4] {
        [
            SubmissionEvent::Submitted,
            SubmissionEvent::Invalid(errors()),
            SubmissionEvent::Accepted(created()),
            SubmissionEvent::Failed(SubmissionError::Failed),
        ]
    }

    #[test]
    fn allowed_transitions() {
        use SubmissionEvent as E;
        use SubmissionState as S;

        assert_eq!(transition(&S::Idle, E::Submitted), Some(S::Pending));
        assert_eq!(
            transition(&S::Idle, E::Invalid(errors())),
            Some(S::Error(SubmissionError::Invalid(errors())))
        );
        assert_eq!(
            transition(&S::Pending, E::Accepted(created())),
            Some(S::Success(created()))
        );
        assert_eq!(
            transition(&S::Pending, E::Failed(SubmissionError::Failed)),
            Some(S::Error(SubmissionError::Failed))
        );
    }

    #[test]
    fn everything_else_is_rejected() {
        let mut allowed = 0;
        for state in states() {
            for event in events() {
                let next = transition(&state, event.clone());
                match (&state, &event) {
                    (SubmissionState::Idle, SubmissionEvent::Submitted)
                    | (SubmissionState::Idle, SubmissionEvent::Invalid(_))
                    | (SubmissionState::Pending, SubmissionEvent::Accepted(_))
                    | (SubmissionState::Pending, SubmissionEvent::Failed(_)) => {
                        assert!(next.is_some());
                        allowed += 1;
                    }
                    _ => assert_eq!(next, None, "{state:?} + {event:?}"),
                }
            }
        }
        assert_eq!(allowed, 4);
    }

    #[test]
    fn terminal_states_accept_nothing() {
        for state in states().into_iter().filter(SubmissionState::is_terminal) {
            for event in events() {
                assert_eq!(transition(&state, event), None);
            }
        }
    }

    #[test]
    fn error_messages() {
        assert_eq!(SubmissionState::Idle.error_message(), None);
        assert_eq!(
            SubmissionState::Error(SubmissionError::Failed).error_message(),
            Some(GENERIC_ERROR_MESSAGE.into())
        );
        assert_eq!(
            SubmissionState::Error(SubmissionError::Invalid(errors())).error_message(),
            Some("Name is required".into())
        );
        assert_eq!(
            SubmissionState::Error(SubmissionError::Rejected {
                message: "Email already subscribed".into(),
                fields: ValidationErrors::new(),
            })
            .error_message(),
            Some("Email already subscribed".into())
        );
    }

    #[test]
    fn field_errors() {
        assert_eq!(
            SubmissionState::Error(SubmissionError::Invalid(errors())).field_errors(),
            Some(&errors())
        );
        assert_eq!(
            SubmissionState::Error(SubmissionError::Rejected {
                message: "nope".into(),
                fields: ValidationErrors::new(),
            })
            .field_errors(),
            None
        );
        assert_eq!(SubmissionState::Pending.field_errors(), None);
    }

    #[test]
    fn from_create_message_error() {
        assert_eq!(
            SubmissionError::from(CreateMessageError::Rejected(ApiError::new(
                "Email already subscribed"
            ))),
            SubmissionError::Rejected {
                message: "Email already subscribed".into(),
                fields: ValidationErrors::new(),
            }
        );
        assert_matches!(
            SubmissionError::from(CreateMessageError::Other(anyhow::anyhow!("timeout"))),
            SubmissionError::Failed
        );
    }

    #[test]
    fn submit_label() {
        assert_eq!(SubmissionState::Idle.submit_label(), "Send Message");
        assert_eq!(SubmissionState::Pending.submit_label(), "Sending...");
    }
}
