pub mod constants;
pub mod countdown;
pub mod currency;
pub mod phrase_round;
pub mod phraseset;
pub mod validation;
