//! Ticket import/export use cases.
//!
//! # Responsibility
//! - Import the stored ticket for display.
//! - Validate form input and export it only when every field passes.
//!
//! # Invariants
//! - Export never reaches the repository with an invalid draft.
//! - Service APIs never bypass repository validation contracts.

use crate::model::ticket::{Ticket, TicketDraft, TicketValidationError};
use crate::repo::ticket_repo::{RepoError, TicketRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Export blocked; every rejected field is listed.
    InvalidDraft(Vec<TicketValidationError>),
    Repo(RepoError),
}

impl ServiceError {
    /// Short notice suitable for showing to the person at the form.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidDraft(errors) => {
                let names: Vec<&str> = errors.iter().map(|err| err.field.name()).collect();
                format!("ticket has invalid fields: {}", names.join(", "))
            }
            Self::Repo(err) if err.is_corrupt() => "stored ticket data is corrupt".to_string(),
            Self::Repo(_) => "ticket file could not be accessed".to_string(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDraft(errors) => {
                let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
                write!(f, "ticket draft rejected: {}", details.join("; "))
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDraft(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper for the ticket record.
pub struct TicketService<R: TicketRepository> {
    repo: R,
}

impl<R: TicketRepository> TicketService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Loads the stored ticket.
    ///
    /// Corrupt or unreadable storage is returned as `ServiceError::Repo`.
    pub fn import_ticket(&self) -> ServiceResult<Ticket> {
        let ticket = self.repo.load()?;
        info!("event=ticket_import module=service status=ok");
        Ok(ticket)
    }

    /// Validates `draft` and saves it.
    ///
    /// # Contract
    /// - All five fields are checked before anything is written.
    /// - Returns the saved record on success.
    pub fn export_ticket(&self, draft: &TicketDraft) -> ServiceResult<Ticket> {
        let ticket = match draft.validate() {
            Ok(ticket) => ticket,
            Err(errors) => {
                warn!(
                    "event=ticket_export module=service status=blocked invalid_fields={}",
                    errors.len()
                );
                return Err(ServiceError::InvalidDraft(errors));
            }
        };

        self.repo.save(&ticket)?;
        info!("event=ticket_export module=service status=ok");
        Ok(ticket)
    }
}
