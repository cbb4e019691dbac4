//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Handles the start command and the trigger button
//! - `callback_handler`: Handles inline menu callback queries
//! - `ui_builder`: Creates keyboards and holds message texts

use teloxide::utils::command::BotCommands;

pub mod callback_handler;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

/// Commands advertised in the Telegram client menu
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "Botni ishga tushirish")]
    Start,
}
