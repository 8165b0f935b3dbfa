use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use voxo_types::api::ErrorResponse;

/// A request that was well-formed but breaks a moderation rule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidOperation {
    #[error("Cannot add self as moderator")]
    AddSelfAsModerator,
    #[error("Cannot remove self as moderator")]
    RemoveSelfAsModerator,
    #[error("Already a moderator")]
    AlreadyModerator,
    #[error("Not a moderator")]
    NotModerator,
    #[error("Cannot ban the streamer")]
    BanStreamer,
    #[error("Cannot ban self")]
    BanSelf,
    #[error("Cannot unban self")]
    UnbanSelf,
    #[error("Not banned")]
    NotBanned,
    #[error("Ban duration out of range")]
    DurationOutOfRange,
    #[error("User not found")]
    UserNotFound,
    #[error("Stream not found")]
    StreamNotFound,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(&'static str),

    #[error(transparent)]
    InvalidOperation(#[from] InvalidOperation),

    /// Storage or runtime failure. The cause is logged, never returned.
    #[error("Internal Error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::InvalidOperation(_) => "invalid_operation",
            Self::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidOperation(InvalidOperation::AlreadyModerator) => StatusCode::CONFLICT,
            Self::InvalidOperation(InvalidOperation::UserNotFound | InvalidOperation::StreamNotFound) => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidOperation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(cause) = &self {
            error!("Internal error: {:#}", cause);
        }

        let body = ErrorResponse {
            kind: self.kind().to_string(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
