// TUI components - one module per panel

pub mod compose;
pub mod feed;
pub mod search_bar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
