use crate::constants::{COUNTDOWN_URGENT_SECS, COUNTDOWN_WARNING_SECS};

/// Remaining-time cutoffs for the countdown display, ordered `urgent < warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownThresholds {
    pub warning_secs: i64,
    pub urgent_secs: i64,
}

impl Default for CountdownThresholds {
    fn default() -> Self {
        Self {
            warning_secs: COUNTDOWN_WARNING_SECS,
            urgent_secs: COUNTDOWN_URGENT_SECS,
        }
    }
}

/// Projection of the current wall-clock time against a fixed deadline.
///
/// `active` is false when there is no deadline at all, which is distinct
/// from an expired countdown (`active && is_expired`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownSnapshot {
    pub active: bool,
    pub remaining_secs: i64,
    pub is_expired: bool,
    pub is_warning: bool,
    pub is_urgent: bool,
}

impl CountdownSnapshot {
    /// Neutral state for when no deadline is set.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Computes the snapshot for `now_ms` against `deadline_ms` (both epoch
    /// milliseconds). Remaining time is floored at zero; the warning and
    /// urgent flags only hold while the deadline has not passed.
    pub fn at(now_ms: f64, deadline_ms: f64, thresholds: CountdownThresholds) -> Self {
        let remaining_ms = deadline_ms - now_ms;
        let is_expired = remaining_ms <= 0.0;
        let remaining_secs = if is_expired {
            0
        } else {
            (remaining_ms / 1000.0).ceil() as i64
        };

        Self {
            active: true,
            remaining_secs,
            is_expired,
            is_warning: !is_expired && remaining_secs <= thresholds.warning_secs,
            is_urgent: !is_expired && remaining_secs <= thresholds.urgent_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> CountdownThresholds {
        CountdownThresholds {
            warning_secs: 10,
            urgent_secs: 5,
        }
    }

    #[test]
    fn test_idle_is_inactive() {
        let snap = CountdownSnapshot::idle();
        assert!(!snap.active);
        assert!(!snap.is_expired);
        assert!(!snap.is_warning);
        assert!(!snap.is_urgent);
    }

    #[test]
    fn test_threshold_crossings() {
        let deadline = 30_000.0;
        // 21s remaining: nothing yet
        let snap = CountdownSnapshot::at(9_000.0, deadline, thresholds());
        assert_eq!(snap.remaining_secs, 21);
        assert!(!snap.is_warning && !snap.is_urgent && !snap.is_expired);
        // 9s remaining: warning only
        let snap = CountdownSnapshot::at(21_000.0, deadline, thresholds());
        assert!(snap.is_warning && !snap.is_urgent);
        // 4s remaining: warning and urgent
        let snap = CountdownSnapshot::at(26_000.0, deadline, thresholds());
        assert!(snap.is_warning && snap.is_urgent && !snap.is_expired);
        // 0s remaining: expired, flags cleared
        let snap = CountdownSnapshot::at(30_000.0, deadline, thresholds());
        assert!(snap.is_expired);
        assert_eq!(snap.remaining_secs, 0);
        assert!(!snap.is_warning && !snap.is_urgent);
    }

    #[test]
    fn test_remaining_floored_at_zero() {
        let snap = CountdownSnapshot::at(45_000.0, 30_000.0, thresholds());
        assert!(snap.is_expired);
        assert_eq!(snap.remaining_secs, 0);
    }

    #[test]
    fn test_not_expired_until_deadline() {
        let deadline = 10_000.0;
        for now in [0.0, 5_000.0, 9_999.0] {
            assert!(!CountdownSnapshot::at(now, deadline, thresholds()).is_expired);
        }
        assert!(CountdownSnapshot::at(10_000.0, deadline, thresholds()).is_expired);
        assert!(CountdownSnapshot::at(10_001.0, deadline, thresholds()).is_expired);
    }

    #[test]
    fn test_partial_seconds_round_up() {
        let snap = CountdownSnapshot::at(0.0, 1_500.0, thresholds());
        assert_eq!(snap.remaining_secs, 2);
    }
}
