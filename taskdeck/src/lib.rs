//! `TaskDeck`: terminal task manager backed by a REST task API.

pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod sync;
pub mod ui;
