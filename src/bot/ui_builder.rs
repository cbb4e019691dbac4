//! UI Builder module for creating keyboards and message texts

use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, KeyboardRemove,
    ReplyMarkup,
};

pub use crate::catalog::BACK_BUTTON;
pub use crate::navigation::TRIGGER_LABEL;

use crate::catalog::Catalog;

pub const START_PROMPT: &str =
    "Botni ishga tushirish uchun pastdagi \"Boshlash 🚀\" tugmasini bosing.";
pub const MENU_PROMPT: &str = "📚 Modulni tanlang:";
pub const UNKNOWN_SELECTION_NOTICE: &str =
    "Kutilmagan xato. Iltimos, /start yoki boshlash tugmasini bosing.";
/// Sent alongside the keyboard removal, Telegram refuses empty messages
pub const TRIGGER_CLEARED: &str = "✅";

/// One inline button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: String,
    pub callback_id: String,
}

impl MenuButton {
    fn same(text: &str) -> Self {
        Self {
            label: text.to_string(),
            callback_id: text.to_string(),
        }
    }
}

/// Rows of inline buttons, one button per row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuDescriptor {
    rows: Vec<Vec<MenuButton>>,
}

impl MenuDescriptor {
    pub fn rows(&self) -> &[Vec<MenuButton>] {
        &self.rows
    }

    pub fn callback_ids(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .flatten()
            .map(|button| button.callback_id.as_str())
    }

    pub fn has_back(&self) -> bool {
        self.callback_ids().any(|id| id == BACK_BUTTON)
    }
}

/// Reply markup attached to an outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    /// Inline menu under the message
    Menu(MenuDescriptor),
    /// One-time reply keyboard with a single button
    TriggerPrompt(String),
    /// Remove any reply keyboard left on the client
    RemoveTrigger,
}

/// Build a menu with one row per name, callback data equal to the name
pub fn build_menu<I, S>(names: I, include_back: bool) -> MenuDescriptor
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut rows: Vec<Vec<MenuButton>> = names
        .into_iter()
        .map(|name| vec![MenuButton::same(name.as_ref())])
        .collect();

    if include_back {
        rows.push(vec![MenuButton::same(BACK_BUTTON)]);
    }

    MenuDescriptor { rows }
}

/// Every catalog module, no back control
pub fn main_menu(catalog: &Catalog) -> MenuDescriptor {
    build_menu(catalog.names(), false)
}

pub fn back_only_menu() -> MenuDescriptor {
    build_menu(std::iter::empty::<&str>(), true)
}

impl From<&MenuDescriptor> for InlineKeyboardMarkup {
    fn from(menu: &MenuDescriptor) -> Self {
        InlineKeyboardMarkup::new(menu.rows.iter().map(|row| {
            row.iter()
                .map(|button| {
                    InlineKeyboardButton::callback(button.label.clone(), button.callback_id.clone())
                })
                .collect::<Vec<_>>()
        }))
    }
}

/// One-time, resized reply keyboard with a single button
pub fn trigger_keyboard(label: &str) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(label)]])
        .resize_keyboard()
        .one_time_keyboard()
}

impl From<Markup> for ReplyMarkup {
    fn from(markup: Markup) -> Self {
        match markup {
            Markup::Menu(menu) => InlineKeyboardMarkup::from(&menu).into(),
            Markup::TriggerPrompt(label) => trigger_keyboard(&label).into(),
            Markup::RemoveTrigger => KeyboardRemove::new().into(),
        }
    }
}
