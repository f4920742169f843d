use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::types::Channel;
use crate::error::OtpServiceError;
use crate::state::AppState;
use crate::usecase::otp::{IssueOtpInput, IssueOtpUseCase, VerifyOtpInput, VerifyOtpUseCase};

// ── POST /otp ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IssueOtpRequest {
    pub identifier: String,
    pub code: Option<String>,
}

#[derive(Serialize)]
pub struct IssueOtpResponse {
    pub identifier: String,
    pub channel: Channel,
    pub expires_in_secs: i64,
}

pub async fn issue_otp(
    State(state): State<AppState>,
    Json(body): Json<IssueOtpRequest>,
) -> Result<(StatusCode, Json<IssueOtpResponse>), OtpServiceError> {
    let usecase = IssueOtpUseCase {
        store: state.store.clone(),
        notifier: state.notifier.clone(),
    };
    let issued = usecase
        .execute(IssueOtpInput {
            identifier: body.identifier,
            code: body.code,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(IssueOtpResponse {
            identifier: issued.identifier.to_string(),
            channel: issued.channel,
            expires_in_secs: issued.expires_in_secs,
        }),
    ))
}

// ── POST /otp/verify ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub identifier: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: &'static str,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, OtpServiceError> {
    let usecase = VerifyOtpUseCase {
        store: state.store.clone(),
    };
    let outcome = usecase.execute(VerifyOtpInput {
        identifier: body.identifier,
        code: body.code,
    })?;

    Ok(Json(VerifyOtpResponse {
        success: outcome.is_success(),
        message: outcome.reason(),
    }))
}
