use axum::Json;
use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use partscout_inventory::error::{Error as InventoryError, ErrorKind as InventoryErrorKind};
use partscout_resolve::Stage;
use partscout_resolve::error::{Error as ResolveError, ErrorKind as ResolveErrorKind};
use serde_json::json;

/// An error response: a status and a `{"error": "..."}` body.
///
/// Server-side failures are logged in full here; the client only gets the
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn internal(message: &str, err: &dyn std::fmt::Debug) -> Self {
        tracing::error!("{err:?}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn from_datasheet(err: ResolveError, word: &str) -> Self {
        match &*err {
            ResolveErrorKind::MissingParameter(_) => Self::bad_request("Missing query parameter for search"),
            ResolveErrorKind::NotFound(_) => {
                Self::not_found(format!("Article matching the strict criteria for '{word}' was not found."))
            },
            _ => Self::internal("Failed to complete search due to internal server error.", &err),
        }
    }

    pub fn from_substitutes(err: ResolveError) -> Self {
        match &*err {
            ResolveErrorKind::MissingParameter(_) => Self::bad_request("Missing search parameter"),
            ResolveErrorKind::NotFound(Stage::SubstitutionLink) => Self::not_found("Substitution link not found"),
            ResolveErrorKind::NotFound(_) => Self::not_found("Exact transistor not found"),
            _ => Self::internal("Failed to fetch or parse data", &err),
        }
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        match &*err {
            InventoryErrorKind::ComponentNotFound(_) => Self::not_found("Component not found"),
            InventoryErrorKind::MissingField(field) => Self::bad_request(format!("{field} is required")),
            InventoryErrorKind::ComponentInUse(_) => Self::new(StatusCode::CONFLICT, err.to_string()),
            kind if kind.is_invalid_input() => Self::bad_request(kind.to_string()),
            _ => Self::internal("Server error", &err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// `Json<T>` whose rejections answer with the same `{"error": "..."}` body as
/// every other failure.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
