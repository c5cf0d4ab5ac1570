use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_api_contracts::messages::{ApiCreateMessageRequest, ApiMessageCreated, CREATE_MESSAGE};
use folio_core_contact_contracts::{ContactCreateMessageError, ContactFeatureService};

use crate::errors::{error, internal_server_error, STORE_UNAVAILABLE_DETAIL};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(CREATE_MESSAGE.path, routing::post(create_message))
        .with_state(service)
}

async fn create_message(
    service: State<Arc<impl ContactFeatureService>>,
    request: Result<Json<ApiCreateMessageRequest>, JsonRejection>,
) -> Response {
    let request = match request {
        Ok(Json(request)) => request,
        Err(rejection) => return error(rejection.status(), rejection.body_text()),
    };

    match service.create_message(request.into()).await {
        Ok(message) => (
            CREATE_MESSAGE.success,
            Json(ApiMessageCreated::from(&message)),
        )
            .into_response(),
        Err(ContactCreateMessageError::Invalid(errors)) => error(StatusCode::BAD_REQUEST, errors),
        Err(ContactCreateMessageError::Unavailable) => {
            error(StatusCode::SERVICE_UNAVAILABLE, STORE_UNAVAILABLE_DETAIL)
        }
        Err(ContactCreateMessageError::Other(err)) => internal_server_error(err),
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use axum::http::{header, Method};
    use chrono::{TimeZone, Utc};
    use folio_core_contact_contracts::MockContactFeatureService;
    use folio_models::{
        contact::{validate_input, ContactField, ContactMessageForm, ValidationErrors},
        message::StoredMessage,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tokio::net::TcpListener;
    use uuid::Uuid;

    use super::*;
    use crate::{RestServer, RestServerConfig};

    const ORIGIN: &str = "https://portfolio.example.dev";

    async fn serve(service: MockContactFeatureService) -> String {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let config = RestServerConfig {
            host: addr.ip(),
            port: addr.port(),
            allowed_origins: vec![ORIGIN.parse().unwrap()].into(),
        };
        tokio::spawn(RestServer::new(config, service).serve_on(listener));
        format!("http://{addr}{}", CREATE_MESSAGE.path)
    }

    fn form() -> ContactMessageForm {
        ContactMessageForm::new("Max Mustermann", "max@example.de", "Hello World!")
    }

    fn body() -> Value {
        json!({"name": "Max Mustermann", "email": "max@example.de", "message": "Hello World!"})
    }

    #[test]
    fn bound_to_post() {
        assert_eq!(CREATE_MESSAGE.method, Method::POST);
    }

    #[tokio::test]
    async fn created() {
        // Arrange
        let stored = StoredMessage {
            id: Uuid::nil().into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            message: validate_input(&form()).unwrap(),
        };
        let service = MockContactFeatureService::new().with_create_message(form(), Ok(stored));
        let url = serve(service).await;

        // Act
        let response = reqwest::Client::new()
            .post(url)
            .json(&body())
            .send()
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(
            response.json::<Value>().await.unwrap(),
            json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "createdAt": "2024-01-01T00:00:00Z"
            })
        );
    }

    #[tokio::test]
    async fn invalid() {
        // Arrange
        let form = ContactMessageForm {
            name: "   ".into(),
            message: "Hi".into(),
            ..form()
        };
        let errors = validate_input(&form).unwrap_err();
        let service = MockContactFeatureService::new()
            .with_create_message(form, Err(ContactCreateMessageError::Invalid(errors)));
        let url = serve(service).await;

        // Act
        let response = reqwest::Client::new()
            .post(url)
            .json(&json!({"name": "   ", "email": "max@example.de", "message": "Hi"}))
            .send()
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>().await.unwrap(),
            json!({
                "message": "Name is required; Message must be at least 10 characters",
                "fields": {
                    "name": "Name is required",
                    "message": "Message must be at least 10 characters"
                }
            })
        );
    }

    #[tokio::test]
    async fn missing_fields_are_validated() {
        // Arrange
        let mut errors = ValidationErrors::new();
        errors.insert(ContactField::Email, "Invalid email address");
        let service = MockContactFeatureService::new().with_create_message(
            ContactMessageForm {
                email: String::new(),
                ..form()
            },
            Err(ContactCreateMessageError::Invalid(errors)),
        );
        let url = serve(service).await;

        // Act
        let response = reqwest::Client::new()
            .post(url)
            .json(&json!({"name": "Max Mustermann", "message": "Hello World!"}))
            .send()
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>().await.unwrap()["fields"],
            json!({"email": "Invalid email address"})
        );
    }

    #[tokio::test]
    async fn unavailable() {
        // Arrange
        let service = MockContactFeatureService::new()
            .with_create_message(form(), Err(ContactCreateMessageError::Unavailable));
        let url = serve(service).await;

        // Act
        let response = reqwest::Client::new()
            .post(url)
            .json(&body())
            .send()
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            response.json::<Value>().await.unwrap(),
            json!({"message": "Message store unavailable"})
        );
    }

    #[tokio::test]
    async fn internal_error() {
        // Arrange
        let service = MockContactFeatureService::new().with_create_message(
            form(),
            Err(ContactCreateMessageError::Other(anyhow::anyhow!("boom"))),
        );
        let url = serve(service).await;

        // Act
        let response = reqwest::Client::new()
            .post(url)
            .json(&body())
            .send()
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>().await.unwrap(),
            json!({"message": "Internal server error"})
        );
    }

    #[tokio::test]
    async fn malformed_json() {
        // Arrange
        let url = serve(MockContactFeatureService::new()).await;

        // Act
        let response = reqwest::Client::new()
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body("{\"name\": ")
            .send()
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.json::<Value>().await.unwrap();
        assert!(body["message"].as_str().is_some_and(|msg| !msg.is_empty()));
    }

    #[tokio::test]
    async fn missing_content_type() {
        // Arrange
        let url = serve(MockContactFeatureService::new()).await;

        // Act
        let response = reqwest::Client::new()
            .post(url)
            .body(body().to_string())
            .send()
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(response.json::<Value>().await.unwrap()["message"].is_string());
    }

    #[tokio::test]
    async fn wrong_method() {
        let url = serve(MockContactFeatureService::new()).await;
        let response = reqwest::Client::new().get(url).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn cors_preflight() {
        // Arrange
        let url = serve(MockContactFeatureService::new()).await;

        // Act
        let response = reqwest::Client::new()
            .request(Method::OPTIONS, url)
            .header(header::ORIGIN, ORIGIN)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .send()
            .await
            .unwrap();

        // Assert
        assert!(response.status().is_success());
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            ORIGIN
        );
    }
}
