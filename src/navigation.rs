//! Navigation events and their classification.
//!
//! The bot keeps no conversation state: every inbound message or callback is
//! classified on its own, and the resulting view follows from the event alone.

use lazy_static::lazy_static;
use regex::Regex;

use crate::catalog::{Catalog, BACK_BUTTON};

/// Command keyword that opens the one-time trigger prompt
pub const START_COMMAND: &str = "start";
/// Label of the one-time trigger button
pub const TRIGGER_LABEL: &str = "Boshlash 🚀";

lazy_static! {
    static ref TRIGGER_PATTERN: Regex = Regex::new(&format!("(?i)^{}$", regex::escape(TRIGGER_LABEL)))
        .expect("Trigger label pattern should be valid");
}

/// An inbound user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// `/start` command
    StartCommand,
    /// The one-time trigger button was pressed
    StartButtonPress,
    /// A catalog module was selected from the menu
    ModuleSelected(String),
    /// The back control was selected
    BackSelected,
    /// Callback data that matches nothing in the catalog
    UnknownSelection(String),
}

/// What the user sees after an event has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    AwaitingStart,
    MainMenuShown,
    ModuleShown,
}

impl NavigationEvent {
    pub fn resulting_view(&self) -> View {
        match self {
            NavigationEvent::StartCommand => View::AwaitingStart,
            NavigationEvent::ModuleSelected(_) => View::ModuleShown,
            NavigationEvent::StartButtonPress
            | NavigationEvent::BackSelected
            | NavigationEvent::UnknownSelection(_) => View::MainMenuShown,
        }
    }
}

/// Classify message text. Returns `None` for text no handler reacts to.
pub fn classify_text(text: &str) -> Option<NavigationEvent> {
    if is_start_command(text) {
        Some(NavigationEvent::StartCommand)
    } else if is_trigger_label(text) {
        Some(NavigationEvent::StartButtonPress)
    } else {
        None
    }
}

/// Classify callback data from an inline menu
pub fn classify_callback(catalog: &Catalog, data: &str) -> NavigationEvent {
    if data == BACK_BUTTON {
        NavigationEvent::BackSelected
    } else if catalog.lookup(data).is_some() {
        NavigationEvent::ModuleSelected(data.to_string())
    } else {
        NavigationEvent::UnknownSelection(data.to_string())
    }
}

/// `/start`, `/start@SomeBot` and `/start <payload>` all count, in any case
pub fn is_start_command(text: &str) -> bool {
    let Some(first) = text.split_whitespace().next() else {
        return false;
    };
    let Some(command) = first.strip_prefix('/') else {
        return false;
    };
    let command = command.split('@').next().unwrap_or(command);
    command.eq_ignore_ascii_case(START_COMMAND)
}

pub fn is_trigger_label(text: &str) -> bool {
    TRIGGER_PATTERN.is_match(text)
}
