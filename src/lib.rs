//! ClarityLog - Personal Productivity Backend
//!
//! This crate implements the ClarityLog API: ownership-scoped tracking of
//! focus sessions, decisions, and rich-text documents, with a merged
//! timeline and derived insights.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
