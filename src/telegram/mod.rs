pub mod api;
pub mod types;

pub use api::{ModerationProvider, TelegramApi};
