pub const COUNTDOWN_TICK_MS: u32 = 1_000;
pub const COUNTDOWN_WARNING_SECS: i64 = 10;
pub const COUNTDOWN_URGENT_SECS: i64 = 5;

pub const DETAIL_POLL_INTERVAL_MS: u32 = 10_000;
pub const VOTE_RESULT_DISPLAY_MS: u32 = 4_000;
pub const SUBMIT_SUCCESS_DISPLAY_MS: u32 = 1_500;
pub const START_FAILURE_REDIRECT_MS: u32 = 2_500;
pub const ERROR_AUTO_HIDE_MS: u32 = 3_000;

pub const MAX_PHRASE_LENGTH: usize = 100;
pub const MAX_PHRASE_WORDS: usize = 12;

// The vote stake is forfeited if the voting round expires unanswered.
pub const VOTE_STAKE_CENTS: i64 = 100;

pub const NETWORK_ERROR: &str = "Network error. Please check your connection";
pub const SESSION_EXPIRED_ERROR: &str = "Session expired. Please log in again";
pub const EMPTY_PHRASE_ERROR: &str = "Please enter a phrase";
pub const PHRASE_TOO_LONG_ERROR: &str = "Phrase is too long";
pub const PHRASE_TOO_MANY_WORDS_ERROR: &str = "Phrase has too many words";
pub const PHRASE_CHARSET_ERROR: &str =
    "Phrases may only contain letters, numbers, spaces and basic punctuation";
pub const COPY_MATCHES_ORIGINAL_ERROR: &str = "Your copy must differ from the original phrase";
