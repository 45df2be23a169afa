pub mod countdown_display;
pub mod error_banner;
pub mod status_badge;

pub use countdown_display::CountdownDisplay;
pub use error_banner::{show_transient, ErrorBanner};
pub use status_badge::StatusBadge;
