//! Transport collaborator: authenticated requests against the game server
//! and normalization of every failure into a single error shape.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;
use web_sys::window;

use shared::constants::{NETWORK_ERROR, SESSION_EXPIRED_ERROR};
use shared::phrase_round::{
    BalanceResponse, CurrentRoundResponse, DailyBonusClaimResponse, DailyBonusStatus,
    FeedbackResponse, FeedbackType, RoundAvailability, RoundType, StartRoundResponse,
    SubmitPhraseResponse, VoteResult,
};
use shared::phraseset::{
    ClaimResponse, DashboardSummary, PendingResult, PhrasesetDetails, PhrasesetSummary,
};

use crate::config::get_api_base_url;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
}

impl ApiError {
    pub fn network() -> Self {
        Self {
            message: NETWORK_ERROR.to_string(),
            status: None,
        }
    }

    /// Failure raised before any request is sent.
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        self.status == Some(409)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

pub fn get_auth_token() -> Option<String> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item("token").ok().flatten())
        .or_else(|| {
            window()
                .and_then(|w| w.session_storage().ok().flatten())
                .and_then(|s| s.get_item("token").ok().flatten())
        })
}

fn bearer() -> ApiResult<String> {
    get_auth_token()
        .map(|t| format!("Bearer {}", t))
        .ok_or(ApiError {
            message: SESSION_EXPIRED_ERROR.to_string(),
            status: Some(401),
        })
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

async fn read_error(response: Response) -> ApiError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) if !body.error.is_empty() => body.error,
        _ => match status {
            401 => SESSION_EXPIRED_ERROR.to_string(),
            404 => "Not found".to_string(),
            409 => "That action is not available right now".to_string(),
            _ => format!("Server error ({})", status),
        },
    };
    ApiError {
        message,
        status: Some(status),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|_| ApiError::local("Failed to parse server response"))
    } else {
        Err(read_error(response).await)
    }
}

async fn get_json<T: DeserializeOwned>(path: &str) -> ApiResult<T> {
    let auth = bearer()?;
    let response = Request::get(&format!("{}{}", get_api_base_url(), path))
        .header("Authorization", &auth)
        .send()
        .await
        .map_err(|_| ApiError::network())?;
    decode(response).await
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> ApiResult<T> {
    let auth = bearer()?;
    let response = Request::post(&format!("{}{}", get_api_base_url(), path))
        .header("Authorization", &auth)
        .header("Content-Type", "application/json")
        .json(body)
        .map_err(|_| ApiError::local("Failed to encode request"))?
        .send()
        .await
        .map_err(|_| ApiError::network())?;
    decode(response).await
}

async fn post_empty<T: DeserializeOwned>(path: &str) -> ApiResult<T> {
    let auth = bearer()?;
    let response = Request::post(&format!("{}{}", get_api_base_url(), path))
        .header("Authorization", &auth)
        .send()
        .await
        .map_err(|_| ApiError::network())?;
    decode(response).await
}

pub async fn fetch_current_round() -> ApiResult<CurrentRoundResponse> {
    get_json("/api/player/current-round").await
}

pub async fn fetch_balance() -> ApiResult<BalanceResponse> {
    get_json("/api/player/balance").await
}

pub async fn fetch_pending_results() -> ApiResult<Vec<PendingResult>> {
    get_json("/api/player/pending-results").await
}

pub async fn fetch_availability() -> ApiResult<RoundAvailability> {
    get_json("/api/rounds/available").await
}

pub async fn fetch_summary() -> ApiResult<DashboardSummary> {
    get_json("/api/player/summary").await
}

pub async fn fetch_daily_bonus() -> ApiResult<DailyBonusStatus> {
    get_json("/api/player/daily-bonus").await
}

pub async fn claim_daily_bonus() -> ApiResult<DailyBonusClaimResponse> {
    post_empty("/api/player/claim-daily-bonus").await
}

pub async fn start_round(round_type: RoundType) -> ApiResult<StartRoundResponse> {
    post_empty(&format!("/api/rounds/{}", round_type.as_str())).await
}

pub async fn submit_phrase(round_id: Uuid, text: &str) -> ApiResult<SubmitPhraseResponse> {
    post_json(
        &format!("/api/rounds/{}/submit", round_id),
        &serde_json::json!({ "text": text }),
    )
    .await
}

pub async fn submit_vote(phraseset_id: Uuid, phrase: &str) -> ApiResult<VoteResult> {
    post_json(
        &format!("/api/phrasesets/{}/vote", phraseset_id),
        &serde_json::json!({ "phrase": phrase }),
    )
    .await
}

pub async fn fetch_phrasesets() -> ApiResult<Vec<PhrasesetSummary>> {
    get_json("/api/phrasesets").await
}

pub async fn fetch_phraseset_details(phraseset_id: Uuid) -> ApiResult<PhrasesetDetails> {
    get_json(&format!("/api/phrasesets/{}/details", phraseset_id)).await
}

pub async fn claim_phraseset(phraseset_id: Uuid) -> ApiResult<ClaimResponse> {
    post_empty(&format!("/api/phrasesets/{}/claim", phraseset_id)).await
}

/// Absent feedback comes back as 404 and is not an error.
pub async fn fetch_feedback(round_id: Uuid) -> ApiResult<Option<FeedbackType>> {
    match get_json::<FeedbackResponse>(&format!("/api/rounds/{}/feedback", round_id)).await {
        Ok(body) => Ok(Some(body.feedback_type)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

pub async fn submit_feedback(round_id: Uuid, feedback_type: FeedbackType) -> ApiResult<()> {
    let _: serde_json::Value = post_json(
        &format!("/api/rounds/{}/feedback", round_id),
        &serde_json::json!({ "feedback_type": feedback_type }),
    )
    .await?;
    Ok(())
}
