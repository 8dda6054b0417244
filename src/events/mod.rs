pub mod chat_member;
pub mod command;
