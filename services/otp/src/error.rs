use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// OTP service error variants.
///
/// The verification outcomes (`OtpNotFound`, `OtpExpired`, `InvalidOtp`) are
/// ordinary results of the code store; they only become errors at the use-case
/// boundary so handlers can map them onto HTTP statuses.
#[derive(Debug, thiserror::Error)]
pub enum OtpServiceError {
    #[error("invalid identifier")]
    InvalidIdentifier,
    #[error("invalid code format")]
    InvalidCode,
    #[error("no pending code; request a new one")]
    OtpNotFound,
    #[error("code expired; request a new one")]
    OtpExpired,
    #[error("invalid code; try again")]
    InvalidOtp,
    #[error("notification gateway unavailable")]
    Gateway(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl OtpServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidIdentifier => "INVALID_IDENTIFIER",
            Self::InvalidCode => "INVALID_CODE",
            Self::OtpNotFound => "OTP_NOT_FOUND",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::InvalidOtp => "INVALID_OTP",
            Self::Gateway(_) => "GATEWAY_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for OtpServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidIdentifier | Self::InvalidCode => StatusCode::BAD_REQUEST,
            Self::OtpNotFound => StatusCode::NOT_FOUND,
            Self::OtpExpired => StatusCode::GONE,
            Self::InvalidOtp => StatusCode::UNAUTHORIZED,
            Self::Gateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are expected client outcomes and TraceLayer already records them.
        match &self {
            Self::Gateway(e) => tracing::warn!(error = %e, kind = self.kind(), "gateway error"),
            Self::Internal(e) => tracing::error!(error = %e, kind = "INTERNAL", "internal error"),
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
