//! Domain layer - entities, value objects, and pure derivation logic.

pub mod credentials;
pub mod decision;
pub mod document;
pub mod focus;
pub mod foundation;
pub mod insights;
pub mod timeline;
pub mod user;
