pub mod bot;
pub mod chat;
pub mod commands;
pub mod config;
pub mod error;
pub mod gemini;
pub mod generation;
pub mod prompt;
pub mod router;
pub mod tone;

pub use bot::run;
