//! Core domain logic for the lottery ticket form.
//! This crate is the single source of truth for field rules and storage.

pub mod config;
pub mod logging;
pub mod model;
pub mod properties;
pub mod repo;
pub mod service;
pub mod session;
pub mod validation;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging};
pub use model::ticket::{Ticket, TicketDraft, TicketField, TicketValidationError};
pub use properties::{Properties, PropertiesError};
pub use repo::ticket_repo::{PropertiesTicketRepository, RepoError, RepoResult, TicketRepository};
pub use service::ticket_service::{ServiceError, ServiceResult, TicketService};
pub use session::{AppSession, SessionError};
pub use validation::{is_valid_date, matches, Pattern};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
