//! HTTP error mapping to RFC-9457 Problem Details

use super::headers::failure_alert;
use crate::contract::PurchasesError;
use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Entity the problem refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Machine-readable key (`idexists`, `idnull`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_key: Option<String>,

    /// Translation key, `error.{errorKey}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Alert headers sent along with the body
    #[serde(skip)]
    pub headers: HeaderMap,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            entity_name: None,
            error_key: None,
            message: None,
            headers: HeaderMap::new(),
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Tag with entity name and error key, plus the matching alert headers
    pub fn with_error_key(
        mut self,
        application_name: &str,
        entity_name: &str,
        error_key: &str,
    ) -> Self {
        self.entity_name = Some(entity_name.to_string());
        self.error_key = Some(error_key.to_string());
        self.message = Some(format!("error.{error_key}"));
        self.headers
            .extend(failure_alert(application_name, entity_name, error_key));
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let headers = self.headers.clone();
        (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/problem+json"),
            )],
            headers,
            Json(self),
        )
            .into_response()
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: PurchasesError, application_name: &str) -> Problem {
    match &error {
        PurchasesError::IdAlreadySet { entity }
        | PurchasesError::IdMissing { entity }
        | PurchasesError::IdMismatch { entity }
        | PurchasesError::EntityNotFound { entity, .. } => {
            let key = error.error_key().unwrap_or_default();
            Problem::new(StatusCode::BAD_REQUEST, error.to_string()).with_error_key(
                application_name,
                entity,
                key,
            )
        }

        PurchasesError::NotFound { entity, id } => {
            Problem::new(StatusCode::NOT_FOUND, "Not Found")
                .with_detail(format!("{} with id '{}' was not found", entity, id))
        }

        PurchasesError::Validation { entity, message } => {
            let mut problem = Problem::new(StatusCode::BAD_REQUEST, "Validation Error")
                .with_detail(message.clone());
            problem.entity_name = (*entity).map(str::to_string);
            problem
        }

        PurchasesError::Internal => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        )
        .with_detail("An unexpected error occurred"),
    }
}

/// Map body extraction failures; an unsupported media type keeps its 415
pub fn map_json_rejection(rejection: JsonRejection) -> Problem {
    let status = match rejection.status() {
        StatusCode::UNSUPPORTED_MEDIA_TYPE => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    };
    Problem::new(status, "Bad Request").with_detail(rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_errors_are_bad_requests_with_key() {
        let problem = map_domain_error(
            PurchasesError::IdAlreadySet {
                entity: "productType",
            },
            "greenFirmHouseApp",
        );
        assert_eq!(problem.status, 400);
        assert_eq!(problem.title, "A new productType cannot already have an ID");
        assert_eq!(problem.error_key.as_deref(), Some("idexists"));
        assert_eq!(problem.message.as_deref(), Some("error.idexists"));
        assert_eq!(problem.entity_name.as_deref(), Some("productType"));
        assert_eq!(
            problem.headers.get("x-greenfirmhouseapp-error").unwrap(),
            "error.idexists"
        );
    }

    #[test]
    fn test_update_of_missing_id_is_bad_request() {
        let problem = map_domain_error(
            PurchasesError::EntityNotFound {
                entity: "customerBought",
                id: 5,
            },
            "app",
        );
        assert_eq!(problem.status, 400);
        assert_eq!(problem.error_key.as_deref(), Some("idnotfound"));
    }

    #[test]
    fn test_not_found_and_internal() {
        let problem = map_domain_error(
            PurchasesError::NotFound {
                entity: "productType",
                id: 1,
            },
            "app",
        );
        assert_eq!(problem.status, 404);
        assert!(problem.error_key.is_none());

        let problem = map_domain_error(PurchasesError::Internal, "app");
        assert_eq!(problem.status, 500);
    }

    #[test]
    fn test_problem_json_shape() {
        let problem = map_domain_error(
            PurchasesError::IdMissing {
                entity: "productType",
            },
            "app",
        );
        let value = serde_json::to_value(&problem).unwrap();
        assert_eq!(value["type"], "https://httpstatuses.io/400");
        assert_eq!(value["entityName"], "productType");
        assert_eq!(value["errorKey"], "idnull");
        assert!(value.get("headers").is_none());
        assert!(value.get("detail").is_none());
    }
}
