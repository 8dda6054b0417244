pub mod app;
pub mod telegram;
