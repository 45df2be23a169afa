use chrono::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundType {
    Prompt,
    Copy,
    Vote,
}

impl RoundType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Prompt => "Prompt",
            Self::Copy => "Copy",
            Self::Vote => "Vote",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Copy => "copy",
            Self::Vote => "vote",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    Active,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    Like,
    Dislike,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptState {
    pub round_id: Uuid,
    pub status: RoundStatus,
    pub expires_at: String,
    pub cost: i64,
    pub prompt_text: String,
    #[serde(default)]
    pub feedback_type: Option<FeedbackType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyState {
    pub round_id: Uuid,
    pub status: RoundStatus,
    pub expires_at: String,
    pub cost: i64,
    pub original_phrase: String,
    #[serde(default)]
    pub discount_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteState {
    pub round_id: Uuid,
    pub status: RoundStatus,
    pub expires_at: String,
    pub phraseset_id: Uuid,
    pub prompt_text: String,
    /// Ballot in server-issued display order. Never resorted.
    pub phrases: Vec<String>,
}

impl VoteState {
    /// A well-formed ballot holds exactly three distinct phrases.
    pub fn has_valid_ballot(&self) -> bool {
        self.phrases.len() == 3
            && self.phrases[0] != self.phrases[1]
            && self.phrases[0] != self.phrases[2]
            && self.phrases[1] != self.phrases[2]
    }
}

/// Type-specific payload of the player's current round, keyed by `round_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "round_type", rename_all = "snake_case")]
pub enum RoundState {
    Prompt(PromptState),
    Copy(CopyState),
    Vote(VoteState),
}

impl RoundState {
    pub fn round_type(&self) -> RoundType {
        match self {
            Self::Prompt(_) => RoundType::Prompt,
            Self::Copy(_) => RoundType::Copy,
            Self::Vote(_) => RoundType::Vote,
        }
    }

    pub fn round_id(&self) -> Uuid {
        match self {
            Self::Prompt(s) => s.round_id,
            Self::Copy(s) => s.round_id,
            Self::Vote(s) => s.round_id,
        }
    }

    pub fn status(&self) -> RoundStatus {
        match self {
            Self::Prompt(s) => s.status,
            Self::Copy(s) => s.status,
            Self::Vote(s) => s.status,
        }
    }

    pub fn expires_at(&self) -> &str {
        match self {
            Self::Prompt(s) => &s.expires_at,
            Self::Copy(s) => &s.expires_at,
            Self::Vote(s) => &s.expires_at,
        }
    }
}

/// The player's current round. Id, type and deadline are read from the
/// typed state, so the pieces can never disagree; absence of a round is
/// `Option<ActiveRound>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveRound {
    pub state: RoundState,
}

impl ActiveRound {
    pub fn round_id(&self) -> Uuid {
        self.state.round_id()
    }

    pub fn round_type(&self) -> RoundType {
        self.state.round_type()
    }

    pub fn status(&self) -> RoundStatus {
        self.state.status()
    }

    pub fn expires_at_ms(&self) -> Option<f64> {
        parse_timestamp_ms(self.state.expires_at())
    }
}

/// Parses an RFC 3339 timestamp into epoch milliseconds.
pub fn parse_timestamp_ms(value: &str) -> Option<f64> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.timestamp_millis() as f64)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentRoundResponse {
    pub round: Option<ActiveRound>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StartRoundResponse {
    pub round: ActiveRound,
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmitPhraseResponse {
    pub round_id: Uuid,
    pub status: RoundStatus,
    pub balance: i64,
}

/// Immediate feedback payload returned by a vote submission.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VoteResult {
    pub correct: bool,
    pub payout: i64,
    pub original_phrase: String,
    pub your_choice: String,
    #[serde(default)]
    pub new_balance: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoundAvailability {
    pub can_prompt: bool,
    pub can_copy: bool,
    pub can_vote: bool,
    pub prompts_waiting: u32,
    pub phrasesets_waiting: u32,
    #[serde(default)]
    pub copy_discount_active: bool,
    pub copy_cost: i64,
    #[serde(default)]
    pub active_round_id: Option<Uuid>,
}

impl RoundAvailability {
    /// The server reports an in-flight round here too, so starts can be
    /// blocked even before the current-round record has been fetched.
    pub fn has_active_round(&self) -> bool {
        self.active_round_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BalanceResponse {
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedbackResponse {
    pub feedback_type: FeedbackType,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyBonusStatus {
    pub available: bool,
    pub amount: i64,
    #[serde(default)]
    pub next_claim_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyBonusClaimResponse {
    pub amount: i64,
    pub new_balance: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote_round_json() -> &'static str {
        r#"{
            "round_id": "7f2c1a90-1111-4222-8333-444455556666",
            "expires_at": "2026-01-15T12:00:30Z",
            "round_type": "vote",
            "status": "active",
            "phraseset_id": "aaaabbbb-cccc-4ddd-8eee-ffff00001111",
            "prompt_text": "A famous last meal",
            "phrases": ["cold pizza", "warm pizza", "stale pizza"]
        }"#
    }

    #[test]
    fn test_tagged_round_state_parses_by_type() {
        let round: ActiveRound = serde_json::from_str(vote_round_json()).unwrap();
        assert_eq!(round.round_type(), RoundType::Vote);
        assert_eq!(round.status(), RoundStatus::Active);
        assert_eq!(
            round.round_id(),
            Uuid::parse_str("7f2c1a90-1111-4222-8333-444455556666").unwrap()
        );
        assert!(round.expires_at_ms().is_some());
        match &round.state {
            RoundState::Vote(v) => {
                assert!(v.has_valid_ballot());
                // Server-issued order is preserved verbatim.
                assert_eq!(v.phrases, ["cold pizza", "warm pizza", "stale pizza"]);
            }
            other => panic!("expected vote state, got {:?}", other),
        }
    }

    #[test]
    fn test_prompt_round_parses_with_optional_feedback() {
        let json = r#"{
            "round_id": "7f2c1a90-1111-4222-8333-444455556666",
            "expires_at": "2026-01-15T12:05:00Z",
            "round_type": "prompt",
            "status": "active",
            "cost": 500,
            "prompt_text": "A famous last meal"
        }"#;
        let round: ActiveRound = serde_json::from_str(json).unwrap();
        match &round.state {
            RoundState::Prompt(p) => {
                assert_eq!(p.cost, 500);
                assert_eq!(p.feedback_type, None);
            }
            other => panic!("expected prompt state, got {:?}", other),
        }
    }

    #[test]
    fn test_absent_round_is_fully_absent() {
        let response: CurrentRoundResponse = serde_json::from_str(r#"{"round": null}"#).unwrap();
        assert!(response.round.is_none());
    }

    #[test]
    fn test_start_round_response_decodes_round_and_balance() {
        let json = format!(r#"{{"round": {}, "balance": 1250}}"#, vote_round_json());
        let response: StartRoundResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(response.balance, 1250);
        assert_eq!(response.round.round_type(), RoundType::Vote);
        assert_eq!(response.round.status(), RoundStatus::Active);
    }

    #[test]
    fn test_availability_reports_in_flight_round() {
        let json = r#"{
            "can_prompt": false,
            "can_copy": true,
            "can_vote": true,
            "prompts_waiting": 2,
            "phrasesets_waiting": 1,
            "copy_cost": 300,
            "active_round_id": "7f2c1a90-1111-4222-8333-444455556666"
        }"#;
        let availability: RoundAvailability = serde_json::from_str(json).unwrap();
        assert!(availability.has_active_round());

        let json = r#"{
            "can_prompt": true,
            "can_copy": true,
            "can_vote": true,
            "prompts_waiting": 0,
            "phrasesets_waiting": 0,
            "copy_cost": 300
        }"#;
        let availability: RoundAvailability = serde_json::from_str(json).unwrap();
        assert!(!availability.has_active_round());
    }

    #[test]
    fn test_duplicate_ballot_rejected() {
        let mut round: ActiveRound = serde_json::from_str(vote_round_json()).unwrap();
        if let RoundState::Vote(v) = &mut round.state {
            v.phrases[2] = v.phrases[0].clone();
            assert!(!v.has_valid_ballot());
        }
    }

    #[test]
    fn test_parse_timestamp_ms() {
        assert_eq!(
            parse_timestamp_ms("1970-01-01T00:00:30Z"),
            Some(30_000.0)
        );
        assert!(parse_timestamp_ms("not a timestamp").is_none());
    }
}
