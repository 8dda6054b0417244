pub mod configs;
pub mod context;
pub mod dispatch;
pub mod events;
pub mod observability;
pub mod server;
pub mod services;
pub mod storage;
pub mod telegram;
pub mod utils;
