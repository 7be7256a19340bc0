use crate::error::AppError;
use rocket::response::status::Custom;
use rocket::serde::json::{self, Json};
use rocket::{Request, http::Status};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{instrument, warn};
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ValidationResponse {
    pub status: String,
    pub errors: HashMap<String, Vec<String>>,
}

impl ValidationResponse {
    pub fn new(errors: HashMap<String, Vec<String>>) -> Self {
        Self {
            status: "error".to_string(),
            errors,
        }
    }

    pub fn with_error(field: &str, message: &str) -> Self {
        let mut errors = HashMap::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        Self::new(errors)
    }
}

pub type ApiError = Custom<Json<ValidationResponse>>;

pub trait ToValidationResponse {
    fn to_validation_response(self) -> ApiError;
}

impl ToValidationResponse for AppError {
    #[instrument]
    fn to_validation_response(self) -> ApiError {
        self.log_and_record("API Validation Error");
        let status = self.status_code();

        let response = match self {
            AppError::NotFound(msg) => ValidationResponse::with_error("resource", &msg),
            AppError::Validation(errors) => ValidationResponse::new(field_error_map(&errors)),
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                ValidationResponse::with_error("server", "Internal server error")
            }
        };

        Custom(status, Json(response))
    }
}

impl ToValidationResponse for Status {
    #[instrument]
    fn to_validation_response(self) -> ApiError {
        let (field, message) = match self.code {
            404 => ("resource", "Resource not found"),
            400 => ("request", "Bad request"),
            422 => ("validation", "Validation failed"),
            500 => ("server", "Internal server error"),
            503 => ("service", "Service unavailable"),
            _ => ("error", "An error occurred"),
        };

        Custom(self, Json(ValidationResponse::with_error(field, message)))
    }
}

#[derive(Debug)]
pub struct ValidationErrorWrapper(pub ValidationErrors);

fn field_error_map(errors: &ValidationErrors) -> HashMap<String, Vec<String>> {
    let mut error_map = HashMap::new();

    for (field, field_errors) in errors.field_errors() {
        let error_messages: Vec<String> = field_errors
            .iter()
            .map(|error| {
                error
                    .message
                    .clone()
                    .unwrap_or_else(|| "Invalid value".into())
                    .to_string()
            })
            .collect();

        error_map.insert(field.to_string(), error_messages);
    }

    error_map
}

impl From<ValidationErrorWrapper> for ApiError {
    #[instrument]
    fn from(wrapper: ValidationErrorWrapper) -> Self {
        let error_map = field_error_map(&wrapper.0);

        warn!(fields = ?error_map.keys().collect::<Vec<_>>(), "Request failed validation");

        Custom(
            Status::UnprocessableEntity,
            Json(ValidationResponse::new(error_map)),
        )
    }
}

/// Parses an optional integer query value. Present but unparseable values,
/// including the empty string, are a validation error on `field`.
pub fn parse_id_filter(field: &'static str, raw: Option<&str>) -> Result<Option<i64>, AppError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match raw.trim().parse::<i64>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            let mut error = ValidationError::new("integer");
            error.message = Some(format!("{} must be an integer, got '{}'", field, raw).into());

            let mut errors = ValidationErrors::new();
            errors.add(field, error);

            Err(AppError::Validation(errors))
        }
    }
}

/// Turns a JSON body guard outcome into the validated payload or a 422 response.
pub trait JsonValidateExt<T> {
    fn validate_custom(self) -> Result<T, ApiError>;
}

impl<'r, T: Validate> JsonValidateExt<T> for Result<Json<T>, json::Error<'r>> {
    fn validate_custom(self) -> Result<T, ApiError> {
        let payload = match self {
            Ok(payload) => payload.into_inner(),
            Err(json::Error::Parse(_, e)) => {
                warn!(error = %e, "Malformed JSON body");
                return Err(Custom(
                    Status::UnprocessableEntity,
                    Json(ValidationResponse::with_error("request", &e.to_string())),
                ));
            }
            Err(json::Error::Io(e)) => {
                warn!(error = %e, "Failed to read request body");
                return Err(Custom(
                    Status::BadRequest,
                    Json(ValidationResponse::with_error("request", &e.to_string())),
                ));
            }
        };

        payload
            .validate()
            .map_err(|e| ApiError::from(ValidationErrorWrapper(e)))?;

        Ok(payload)
    }
}

pub trait AppErrorExt<T> {
    fn validate_custom(self) -> Result<T, ApiError>;
}

impl<T> AppErrorExt<T> for Result<T, AppError> {
    fn validate_custom(self) -> Result<T, ApiError> {
        self.map_err(|e| e.to_validation_response())
    }
}

#[catch(default)]
pub fn default_catcher(status: Status, req: &Request) -> ApiError {
    warn!(method = %req.method(), uri = %req.uri(), status = status.code, "Request caught");
    status.to_validation_response()
}
