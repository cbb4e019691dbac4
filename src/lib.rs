//! # Modules Telegram Bot
//!
//! A Telegram bot that shows a fixed catalog of hardware modules through an
//! inline button menu, with a description and picture for each module.

pub mod bot;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod images;
pub mod navigation;
