use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Phraseset lifecycle: `waiting_copies -> waiting_copy1 -> active ->
/// voting -> closing -> finalized`, with `abandoned` reachable from any
/// non-finalized state. `finalized` and `abandoned` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhrasesetStatus {
    WaitingCopies,
    WaitingCopy1,
    Active,
    Voting,
    Closing,
    Finalized,
    Abandoned,
}

impl PhrasesetStatus {
    /// Once terminal, no further state change occurs and polling must stop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finalized | Self::Abandoned)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::WaitingCopies => "Waiting for copies",
            Self::WaitingCopy1 => "Waiting for second copy",
            Self::Active => "Active",
            Self::Voting => "Voting",
            Self::Closing => "Closing",
            Self::Finalized => "Finalized",
            Self::Abandoned => "Abandoned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Prompter,
    Copier,
    Voter,
}

impl PlayerRole {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Prompter => "Prompter",
            Self::Copier => "Copier",
            Self::Voter => "Voter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhrasesetSummary {
    pub phraseset_id: Uuid,
    pub prompt_text: String,
    pub status: PhrasesetStatus,
    pub your_role: PlayerRole,
    /// Only meaningful once the phraseset is finalized.
    #[serde(default)]
    pub your_payout: Option<i64>,
    #[serde(default)]
    pub payout_claimed: bool,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhrasesetDetails {
    pub phraseset_id: Uuid,
    pub prompt_text: String,
    pub status: PhrasesetStatus,
    #[serde(default)]
    pub copies: Vec<String>,
    #[serde(default)]
    pub votes_cast: u32,
    pub your_role: PlayerRole,
    #[serde(default)]
    pub your_payout: Option<i64>,
    #[serde(default)]
    pub payout_claimed: bool,
}

impl PhrasesetDetails {
    pub fn claimable(&self) -> bool {
        self.status == PhrasesetStatus::Finalized
            && !self.payout_claimed
            && self.your_payout.unwrap_or(0) > 0
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PendingResult {
    pub phraseset_id: Uuid,
    pub prompt_text: String,
    pub your_role: PlayerRole,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardSummary {
    pub rounds_played: u32,
    pub phrasesets_in_progress: u32,
    pub unclaimed_total: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClaimResponse {
    pub amount: i64,
    pub new_balance: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFilter {
    All,
    Prompter,
    Copier,
    Voter,
}

impl RoleFilter {
    pub fn matches(&self, role: PlayerRole) -> bool {
        match self {
            Self::All => true,
            Self::Prompter => role == PlayerRole::Prompter,
            Self::Copier => role == PlayerRole::Copier,
            Self::Voter => role == PlayerRole::Voter,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All roles",
            Self::Prompter => "Prompter",
            Self::Copier => "Copier",
            Self::Voter => "Voter",
        }
    }

    pub fn all_options() -> Vec<Self> {
        vec![Self::All, Self::Prompter, Self::Copier, Self::Voter]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Open,
    Settled,
}

impl StatusFilter {
    pub fn matches(&self, status: PhrasesetStatus) -> bool {
        match self {
            Self::All => true,
            Self::Open => !status.is_terminal(),
            Self::Settled => status.is_terminal(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Open => "In progress",
            Self::Settled => "Settled",
        }
    }

    pub fn all_options() -> Vec<Self> {
        vec![Self::All, Self::Open, Self::Settled]
    }
}

/// Applies the role and status filters, keeping server order.
pub fn filter_summaries(
    items: &[PhrasesetSummary],
    role: RoleFilter,
    status: StatusFilter,
) -> Vec<PhrasesetSummary> {
    items
        .iter()
        .filter(|s| role.matches(s.your_role) && status.matches(s.status))
        .cloned()
        .collect()
}

/// Selection rule for a refreshed list: keep the previous selection when it
/// is still present, otherwise fall back to the first item, otherwise clear.
pub fn preserve_selection(
    previous: Option<Uuid>,
    filtered: &[PhrasesetSummary],
) -> Option<Uuid> {
    if let Some(id) = previous {
        if filtered.iter().any(|s| s.phraseset_id == id) {
            return Some(id);
        }
    }
    filtered.first().map(|s| s.phraseset_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: u128, role: PlayerRole, status: PhrasesetStatus) -> PhrasesetSummary {
        PhrasesetSummary {
            phraseset_id: Uuid::from_u128(id),
            prompt_text: format!("prompt {}", id),
            status,
            your_role: role,
            your_payout: None,
            payout_claimed: false,
            updated_at: "2026-01-15T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(PhrasesetStatus::Finalized.is_terminal());
        assert!(PhrasesetStatus::Abandoned.is_terminal());
        for status in [
            PhrasesetStatus::WaitingCopies,
            PhrasesetStatus::WaitingCopy1,
            PhrasesetStatus::Active,
            PhrasesetStatus::Voting,
            PhrasesetStatus::Closing,
        ] {
            assert!(!status.is_terminal(), "{:?} must not be terminal", status);
        }
    }

    #[test]
    fn test_polling_cutoff_over_lifecycle() {
        // Polling runs during every status of the sequence except the
        // terminal one.
        let sequence = [
            PhrasesetStatus::WaitingCopies,
            PhrasesetStatus::Active,
            PhrasesetStatus::Voting,
            PhrasesetStatus::Finalized,
        ];
        let polled: Vec<bool> = sequence.iter().map(|s| !s.is_terminal()).collect();
        assert_eq!(polled, [true, true, true, false]);
    }

    #[test]
    fn test_filter_preserves_order() {
        let items = vec![
            summary(1, PlayerRole::Prompter, PhrasesetStatus::Voting),
            summary(2, PlayerRole::Voter, PhrasesetStatus::Finalized),
            summary(3, PlayerRole::Prompter, PhrasesetStatus::Finalized),
        ];
        let filtered = filter_summaries(&items, RoleFilter::Prompter, StatusFilter::All);
        let ids: Vec<u128> = filtered.iter().map(|s| s.phraseset_id.as_u128()).collect();
        assert_eq!(ids, [1, 3]);

        let settled = filter_summaries(&items, RoleFilter::All, StatusFilter::Settled);
        let ids: Vec<u128> = settled.iter().map(|s| s.phraseset_id.as_u128()).collect();
        assert_eq!(ids, [2, 3]);
    }

    #[test]
    fn test_selection_kept_when_still_present() {
        let items = vec![
            summary(1, PlayerRole::Prompter, PhrasesetStatus::Voting),
            summary(2, PlayerRole::Voter, PhrasesetStatus::Voting),
        ];
        let kept = preserve_selection(Some(Uuid::from_u128(2)), &items);
        assert_eq!(kept, Some(Uuid::from_u128(2)));
    }

    #[test]
    fn test_selection_falls_back_to_first() {
        let items = vec![summary(1, PlayerRole::Prompter, PhrasesetStatus::Voting)];
        let kept = preserve_selection(Some(Uuid::from_u128(9)), &items);
        assert_eq!(kept, Some(Uuid::from_u128(1)));
    }

    #[test]
    fn test_reload_reselects_within_the_filtered_set() {
        // A reload applies the selection rule against the set produced by
        // the filters in force at reload time, so a selection the filters
        // hide is not kept.
        let items = vec![
            summary(1, PlayerRole::Prompter, PhrasesetStatus::Voting),
            summary(2, PlayerRole::Voter, PhrasesetStatus::Finalized),
        ];
        let filtered = filter_summaries(&items, RoleFilter::Voter, StatusFilter::All);
        let kept = preserve_selection(Some(Uuid::from_u128(1)), &filtered);
        assert_eq!(kept, Some(Uuid::from_u128(2)));
    }

    #[test]
    fn test_selection_cleared_when_list_empty() {
        assert_eq!(preserve_selection(Some(Uuid::from_u128(9)), &[]), None);
        assert_eq!(preserve_selection(None, &[]), None);
    }

    #[test]
    fn test_claimable_requires_finalized_unclaimed_payout() {
        let mut details = PhrasesetDetails {
            phraseset_id: Uuid::from_u128(1),
            prompt_text: "p".to_string(),
            status: PhrasesetStatus::Finalized,
            copies: vec![],
            votes_cast: 0,
            your_role: PlayerRole::Prompter,
            your_payout: Some(250),
            payout_claimed: false,
        };
        assert!(details.claimable());

        details.payout_claimed = true;
        assert!(!details.claimable());

        details.payout_claimed = false;
        details.status = PhrasesetStatus::Voting;
        assert!(!details.claimable());

        details.status = PhrasesetStatus::Finalized;
        details.your_payout = None;
        assert!(!details.claimable());
    }
}
