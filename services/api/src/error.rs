use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("case not found")]
    CaseNotFound,
    #[error("sighting not found")]
    SightingNotFound,
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid status transition")]
    InvalidTransition,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("missing data")]
    MissingData,
    #[error("invalid status")]
    InvalidStatus,
    #[error("identity verification required")]
    VerificationRequired,
    #[error("account is flagged")]
    AccountFlagged,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CaseNotFound => "CASE_NOT_FOUND",
            Self::SightingNotFound => "SIGHTING_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::VerificationRequired => "VERIFICATION_REQUIRED",
            Self::AccountFlagged => "ACCOUNT_FLAGGED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::CaseNotFound | Self::SightingNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::EmailTaken | Self::InvalidTransition => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::InvalidToken | Self::InvalidRefreshToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::MissingData | Self::InvalidStatus => StatusCode::BAD_REQUEST,
            Self::VerificationRequired | Self::AccountFlagged | Self::Forbidden => {
                StatusCode::FORBIDDEN
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
