//! Pokedex Library
//!
//! Exposes the caching API client, pagination cursor, command parsing and REPL
//! state for use by the binary and integration tests.

pub mod api;
pub mod app;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod data;
