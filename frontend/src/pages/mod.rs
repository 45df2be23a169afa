pub mod copy_round;
pub mod dashboard;
pub mod phrasesets;
pub mod prompt_round;
pub mod vote_round;
