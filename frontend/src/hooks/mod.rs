pub mod auth_state;
pub mod use_balance;
pub mod use_countdown;
pub mod use_detail_polling;
pub mod use_visibility;

pub use auth_state::*;
pub use use_balance::*;
pub use use_countdown::*;
pub use use_detail_polling::*;
pub use use_visibility::*;
