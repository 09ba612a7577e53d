use crate::api::v1::handler::ApiResponse;
use crate::application_port::{AuthError, DebtError};
use serde::{Serialize, Serializer};
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    if let Some(err) = err.find::<ApiErrorCode>() {
        let json = warp::reply::json(&ApiResponse::<()>::err(err.clone(), err.to_string()));
        Ok(warp::reply::with_status(json, StatusCode::OK))
    } else {
        let json = warp::reply::json(&ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(ApiError {
                code: ApiErrorCode::InternalError,
                message: format!("Unhandled error: {:?}", err),
            }),
        });
        Ok(warp::reply::with_status(
            json,
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Error)]
pub enum ApiErrorCode {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Token is not valid")]
    InvalidToken,
    #[error("Not permitted")]
    NotPermitted,
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }

    fn code_str(&self) -> &'static str {
        match self {
            ApiErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiErrorCode::InvalidToken => "INVALID_TOKEN",
            ApiErrorCode::NotPermitted => "NOT_PERMITTED",
            ApiErrorCode::NotFound => "NOT_FOUND",
            ApiErrorCode::Validation(_) => "VALIDATION_FAILED",
            ApiErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

// The wire code is the bare variant name; detail travels in the message.
impl Serialize for ApiErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code_str())
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<AuthError> for ApiErrorCode {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials => ApiErrorCode::InvalidCredentials,
            AuthError::TokenInvalid | AuthError::TokenExpired => ApiErrorCode::InvalidToken,
            AuthError::NotPermitted => ApiErrorCode::NotPermitted,
            AuthError::UserNotFound => ApiErrorCode::NotFound,
            AuthError::UserExists => {
                ApiErrorCode::Validation("username already taken".to_string())
            }
            AuthError::Validation(msg) => ApiErrorCode::Validation(msg),
            AuthError::Store(e) | AuthError::InternalError(e) => ApiErrorCode::internal(e),
        }
    }
}

impl From<DebtError> for ApiErrorCode {
    fn from(error: DebtError) -> Self {
        match error {
            DebtError::Validation(msg) => ApiErrorCode::Validation(msg),
            DebtError::NotPermitted => ApiErrorCode::NotPermitted,
            DebtError::NotFound => ApiErrorCode::NotFound,
            DebtError::Store(e) | DebtError::InternalError(e) => ApiErrorCode::internal(e),
        }
    }
}
