//! Query/command handlers, one struct per operation.
//!
//! Handlers depend only on ports; adapters are wired in at the HTTP
//! layer. All handlers return `Result<_, DomainError>` so callers branch
//! on the discriminator instead of catching exceptions.

mod account;
mod decisions;
mod documents;
mod focus;
mod insights;
mod timeline;

pub use account::{
    AccountView, LoginCommand, LoginHandler, SignupCommand, SignupHandler, SignupResult,
};
pub use decisions::{
    GetRecentDecisionsHandler, GetRecentDecisionsQuery, RecordDecisionCommand,
    RecordDecisionHandler,
};
pub use documents::{
    CreateDocumentCommand, CreateDocumentHandler, GetDocumentHandler, GetDocumentQuery,
    ListDocumentsHandler, ListDocumentsQuery, UpdateDocumentCommand, UpdateDocumentHandler,
};
pub use focus::{GetAllFocusHandler, GetAllFocusQuery, RecordFocusCommand, RecordFocusHandler};
pub use insights::{GetInsightsHandler, GetInsightsQuery};
pub use timeline::{GetTimelineHandler, GetTimelineQuery};
