//! Client side controller of the contact form.
//!
//! The presentation layer owns one [`ContactForm`] per rendered form, reads
//! its state (or subscribes to it) and calls [`ContactForm::submit`] when the
//! user presses the submit button.

use std::{
    panic::AssertUnwindSafe,
    sync::{Arc, Weak},
};

use anyhow::anyhow;

use folio_api_contracts::messages::ApiMessageCreated;
use folio_client_contracts::{
    api::{CreateMessageError, MessageApiService},
    notification::{Notification, NotificationService},
    state::{transition, SubmissionError, SubmissionEvent, SubmissionState},
};
use folio_models::contact::{validate_input, ContactMessageForm, ValidationErrors};
use futures::FutureExt;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, error, warn};

pub struct ContactForm<Api, Notify> {
    api: Arc<Api>,
    shared: Arc<Shared<Notify>>,
}

/// The part of the form a pending request reports back to. Requests only
/// hold a weak reference, so dropping the form discards their results.
struct Shared<Notify> {
    notify: Notify,
    values: watch::Sender<ContactMessageForm>,
    state: watch::Sender<SubmissionState>,
}

impl<Api, Notify> ContactForm<Api, Notify>
where
    Api: MessageApiService,
    Notify: NotificationService,
{
    pub fn new(api: Api, notify: Notify) -> Self {
        Self {
            api: Arc::new(api),
            shared: Arc::new(Shared {
                notify,
                values: watch::Sender::new(ContactMessageForm::default()),
                state: watch::Sender::new(SubmissionState::Idle),
            }),
        }
    }

    /// Starts a new submission attempt with the given form contents.
    ///
    /// Invalid input ends the attempt immediately in
    /// [`SubmissionState::Error`] without contacting the server. Valid input
    /// is sent in a task spawned onto the current tokio runtime, whose handle
    /// is returned.
    ///
    /// Returns `None` if no request was issued, either because the input is
    /// invalid or because another attempt is still pending. In the latter
    /// case the call is ignored entirely.
    pub fn submit(&self, input: ContactMessageForm) -> Option<JoinHandle<()>> {
        let validated = validate_input(&input);
        let event = match &validated {
            Ok(_) => SubmissionEvent::Submitted,
            Err(errors) => SubmissionEvent::Invalid(errors.clone()),
        };

        let mut started = false;
        self.shared.state.send_if_modified(|state| {
            if state.is_pending() {
                return false;
            }
            match transition(&SubmissionState::Idle, event) {
                Some(next) => {
                    *state = next;
                    started = true;
                    true
                }
                None => false,
            }
        });

        if !started {
            debug!("submission already in progress, ignoring");
            return None;
        }

        self.shared.values.send_replace(input);

        let message = match validated {
            Ok(message) => message,
            Err(errors) => {
                debug!(%errors, "contact form is invalid");
                self.shared
                    .notify
                    .notify(Notification::send_failed(errors.to_string()));
                return None;
            }
        };

        let api = Arc::clone(&self.api);
        let shared = Arc::downgrade(&self.shared);
        Some(tokio::spawn(async move {
            let result = AssertUnwindSafe(api.create_message(&message))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    error!("message api panicked");
                    Err(anyhow!("message api panicked").into())
                });
            Shared::complete(shared, result);
        }))
    }

    pub fn state(&self) -> SubmissionState {
        self.shared.state.borrow().clone()
    }

    /// Receives every state change of this form.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.shared.state.subscribe()
    }

    /// The form contents currently held by the form.
    ///
    /// These are the values of the latest submission attempt, and are
    /// cleared once a message has been accepted.
    pub fn values(&self) -> ContactMessageForm {
        self.shared.values.borrow().clone()
    }

    pub fn subscribe_values(&self) -> watch::Receiver<ContactMessageForm> {
        self.shared.values.subscribe()
    }

    pub fn is_pending(&self) -> bool {
        self.shared.state.borrow().is_pending()
    }

    pub fn error_message(&self) -> Option<String> {
        self.shared.state.borrow().error_message()
    }

    pub fn field_errors(&self) -> Option<ValidationErrors> {
        self.shared.state.borrow().field_errors().cloned()
    }

    pub fn submit_label(&self) -> &'static str {
        self.shared.state.borrow().submit_label()
    }
}

impl<Notify: NotificationService> Shared<Notify> {
    fn complete(this: Weak<Self>, result: Result<ApiMessageCreated, CreateMessageError>) {
        let Some(this) = this.upgrade() else {
            debug!("contact form was dropped, discarding response");
            return;
        };

        let (event, notification) = match result {
            Ok(created) => {
                debug!(id = created.id.as_str(), "message accepted");
                (SubmissionEvent::Accepted(created), Notification::message_sent())
            }
            Err(err) => {
                warn!("Failed to send contact message: {err:#}");
                let err = SubmissionError::from(err);
                let notification = Notification::send_failed(err.to_string());
                (SubmissionEvent::Failed(err), notification)
            }
        };
        let accepted = matches!(event, SubmissionEvent::Accepted(_));

        let applied = this
            .state
            .send_if_modified(|state| match transition(state, event) {
                Some(next) => {
                    *state = next;
                    true
                }
                None => false,
            });
        if !applied {
            warn!("discarding response of a submission that is no longer pending");
            return;
        }

        if accepted {
            this.values.send_replace(ContactMessageForm::default());
        }
        this.notify.notify(notification);
    }
}
