//! Application layer - query and command handlers.

pub mod handlers;
