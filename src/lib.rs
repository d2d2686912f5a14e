//! Answerious forum board library.
//!
//! A small message board: visitors post text with an optional image and
//! others reply with comments. The whole board is kept in memory and saved
//! to a single JSON file after every change.

pub mod components;
pub mod config;
pub mod forum;
pub mod store;
pub mod uploads;
pub mod web;
