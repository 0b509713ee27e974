//! `mailclassify`: a terminal client for an email classification service.
//!
//! This crate provides the core library: input validation, the HTTP client
//! for the service, the form controller that turns user actions into state
//! and notices, clipboard copying, and the terminal UI built on top of them.

pub mod client;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod i18n;
pub mod model;
pub mod notify;
pub mod tui;
