/// Lifecycle of a round page. Initialization runs exactly once per mount:
/// `Uninitialized` transitions to `Starting` (new round requested) or
/// straight to `Active` (attached to the round already in the store).
/// `Submitted` and `VotedResult` are terminal; navigation follows shortly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Uninitialized,
    Starting,
    Active,
    Submitting,
    Submitted,
    VotedResult,
    Expired,
}

impl RoundPhase {
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Phase after the deadline passes. Only an in-play round expires; an
    /// in-flight submission waits for the server's answer and a shown
    /// outcome keeps showing.
    pub fn on_deadline(self) -> RoundPhase {
        if self == Self::Active {
            Self::Expired
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_only_expires_an_active_round() {
        assert_eq!(RoundPhase::Active.on_deadline(), RoundPhase::Expired);
        for phase in [
            RoundPhase::Uninitialized,
            RoundPhase::Starting,
            RoundPhase::Submitting,
            RoundPhase::Submitted,
            RoundPhase::VotedResult,
            RoundPhase::Expired,
        ] {
            assert_eq!(phase.on_deadline(), phase);
        }
    }
}
