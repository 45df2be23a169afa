//! Round Session Store: the single in-memory copy of the player's current
//! round and volatile aggregates, plus the mutating operations against the
//! server. Every refresh replaces its aggregate wholesale; the server's view
//! always wins. Failed operations never touch the store.

use std::rc::Rc;

use uuid::Uuid;
use yew::prelude::*;

use shared::constants::EMPTY_PHRASE_ERROR;
use shared::phrase_round::{
    ActiveRound, DailyBonusClaimResponse, DailyBonusStatus, RoundAvailability, RoundType,
    SubmitPhraseResponse, VoteResult,
};
use shared::phraseset::{DashboardSummary, PendingResult};

use crate::api::{self, ApiError, ApiResult};
use crate::base::dispatch_balance_event;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub active_round: Option<ActiveRound>,
    pub availability: Option<RoundAvailability>,
    pub pending_results: Vec<PendingResult>,
    pub balance: Option<i64>,
    pub daily_bonus: Option<DailyBonusStatus>,
    pub summary: Option<DashboardSummary>,
}

pub enum SessionAction {
    SetRound(Option<ActiveRound>),
    SetAvailability(RoundAvailability),
    SetPendingResults(Vec<PendingResult>),
    SetBalance(i64),
    SetDailyBonus(DailyBonusStatus),
    SetSummary(DashboardSummary),
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: SessionAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            SessionAction::SetRound(round) => next.active_round = round,
            SessionAction::SetAvailability(availability) => {
                next.availability = Some(availability)
            }
            SessionAction::SetPendingResults(results) => next.pending_results = results,
            SessionAction::SetBalance(balance) => next.balance = Some(balance),
            SessionAction::SetDailyBonus(status) => next.daily_bonus = Some(status),
            SessionAction::SetSummary(summary) => next.summary = Some(summary),
        }
        next.into()
    }
}

/// Explicit handle to the store, provided through context and threaded into
/// each page. Cloning is cheap; all clones share the same state.
#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    inner: UseReducerHandle<SessionState>,
}

impl SessionHandle {
    pub fn new(inner: UseReducerHandle<SessionState>) -> Self {
        Self { inner }
    }

    pub fn state(&self) -> &SessionState {
        &self.inner
    }

    pub fn active_round(&self) -> Option<&ActiveRound> {
        self.inner.active_round.as_ref()
    }

    fn set_balance(&self, balance: i64) {
        self.inner.dispatch(SessionAction::SetBalance(balance));
        dispatch_balance_event(balance);
    }

    pub async fn refresh_current_round(&self) -> ApiResult<()> {
        let response = api::fetch_current_round().await?;
        self.inner.dispatch(SessionAction::SetRound(response.round));
        Ok(())
    }

    pub async fn refresh_balance(&self) -> ApiResult<()> {
        let response = api::fetch_balance().await?;
        self.set_balance(response.balance);
        Ok(())
    }

    pub async fn refresh_availability(&self) -> ApiResult<()> {
        let response = api::fetch_availability().await?;
        self.inner.dispatch(SessionAction::SetAvailability(response));
        Ok(())
    }

    pub async fn refresh_pending_results(&self) -> ApiResult<()> {
        let response = api::fetch_pending_results().await?;
        self.inner.dispatch(SessionAction::SetPendingResults(response));
        Ok(())
    }

    pub async fn refresh_daily_bonus(&self) -> ApiResult<()> {
        let response = api::fetch_daily_bonus().await?;
        self.inner.dispatch(SessionAction::SetDailyBonus(response));
        Ok(())
    }

    pub async fn refresh_summary(&self) -> ApiResult<()> {
        let response = api::fetch_summary().await?;
        self.inner.dispatch(SessionAction::SetSummary(response));
        Ok(())
    }

    /// Dashboard-level refresh: a fan-out of uncorrelated reads. Each fetch
    /// succeeds or fails on its own; one failure never blocks the others.
    pub async fn refresh_all(&self) {
        let (round, balance, availability, pending, bonus, summary) = futures::join!(
            api::fetch_current_round(),
            api::fetch_balance(),
            api::fetch_availability(),
            api::fetch_pending_results(),
            api::fetch_daily_bonus(),
            api::fetch_summary(),
        );
        match round {
            Ok(response) => self.inner.dispatch(SessionAction::SetRound(response.round)),
            Err(err) => log::warn!("current-round refresh failed: {}", err.message),
        }
        match balance {
            Ok(response) => self.set_balance(response.balance),
            Err(err) => log::warn!("balance refresh failed: {}", err.message),
        }
        match availability {
            Ok(response) => self.inner.dispatch(SessionAction::SetAvailability(response)),
            Err(err) => log::warn!("availability refresh failed: {}", err.message),
        }
        match pending {
            Ok(response) => self.inner.dispatch(SessionAction::SetPendingResults(response)),
            Err(err) => log::warn!("pending-results refresh failed: {}", err.message),
        }
        match bonus {
            Ok(response) => self.inner.dispatch(SessionAction::SetDailyBonus(response)),
            Err(err) => log::warn!("daily-bonus refresh failed: {}", err.message),
        }
        match summary {
            Ok(response) => self.inner.dispatch(SessionAction::SetSummary(response)),
            Err(err) => log::warn!("summary refresh failed: {}", err.message),
        }
    }

    /// Starts a round of the given type. The server rejects starts while
    /// another round is active; the client only disables the UI action.
    /// The response payload and the canonical round record may diverge in
    /// optional fields, so the current round is re-fetched right after.
    pub async fn start_round(&self, round_type: RoundType) -> ApiResult<ActiveRound> {
        if let Some(existing) = self.active_round() {
            if existing.round_type() != round_type {
                log::info!(
                    "starting a {} round while a {} round is tracked locally; server decides",
                    round_type.as_str(),
                    existing.round_type().as_str()
                );
            }
        }
        let response = api::start_round(round_type).await?;
        self.set_balance(response.balance);
        self.inner
            .dispatch(SessionAction::SetRound(Some(response.round.clone())));
        if let Err(err) = self.refresh_current_round().await {
            log::warn!("post-start round refresh failed: {}", err.message);
        }
        if let Err(err) = self.refresh_availability().await {
            log::warn!("post-start availability refresh failed: {}", err.message);
        }
        Ok(response.round)
    }

    /// Submits a phrase for the loaded round. Only the round-id match and
    /// non-emptiness are checked locally; content rules are server-enforced.
    /// A successful submission changes both round status and balance, so
    /// both refreshes are attempted afterwards.
    pub async fn submit_phrase(
        &self,
        round_id: Uuid,
        text: &str,
    ) -> ApiResult<SubmitPhraseResponse> {
        let current = self
            .active_round()
            .ok_or_else(|| ApiError::local("No active round"))?;
        if current.round_id() != round_id {
            return Err(ApiError::local("This round is no longer loaded"));
        }
        if text.trim().is_empty() {
            return Err(ApiError::local(EMPTY_PHRASE_ERROR));
        }
        let response = api::submit_phrase(round_id, text.trim()).await?;
        if let Err(err) = self.refresh_current_round().await {
            log::warn!("post-submit round refresh failed: {}", err.message);
        }
        if let Err(err) = self.refresh_balance().await {
            log::warn!("post-submit balance refresh failed: {}", err.message);
        }
        Ok(response)
    }

    /// Submits a vote and returns the immediate result payload for instant
    /// feedback, then brings every affected aggregate current.
    pub async fn submit_vote(&self, phraseset_id: Uuid, phrase: &str) -> ApiResult<VoteResult> {
        let response = api::submit_vote(phraseset_id, phrase).await?;
        if let Some(balance) = response.new_balance {
            self.set_balance(balance);
        }
        let (round, balance, availability, pending) = futures::join!(
            self.refresh_current_round(),
            self.refresh_balance(),
            self.refresh_availability(),
            self.refresh_pending_results(),
        );
        for result in [round, balance, availability, pending] {
            if let Err(err) = result {
                log::warn!("post-vote refresh failed: {}", err.message);
            }
        }
        Ok(response)
    }

    /// Claiming when no bonus is available surfaces the server's conflict
    /// error to the caller; it is never a silent no-op.
    pub async fn claim_daily_bonus(&self) -> ApiResult<DailyBonusClaimResponse> {
        let response = api::claim_daily_bonus().await?;
        self.set_balance(response.new_balance);
        if let Err(err) = self.refresh_daily_bonus().await {
            log::warn!("post-claim bonus refresh failed: {}", err.message);
        }
        Ok(response)
    }

    /// Store-side half of a phraseset claim: balance, dashboard summary and
    /// the unclaimed-results aggregate all change together with the claim.
    pub async fn refresh_after_claim(&self) {
        let (balance, summary, pending) = futures::join!(
            self.refresh_balance(),
            self.refresh_summary(),
            self.refresh_pending_results(),
        );
        for result in [balance, summary, pending] {
            if let Err(err) = result {
                log::warn!("post-claim refresh failed: {}", err.message);
            }
        }
    }
}
