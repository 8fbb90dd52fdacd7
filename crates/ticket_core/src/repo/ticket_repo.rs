//! Ticket repository contract and properties-file implementation.
//!
//! # Responsibility
//! - Load one ticket from a flat properties file, validating every field.
//! - Save one ticket under the namespaced `ticket.*` keys.
//!
//! # Invariants
//! - `load` returns either a fully valid `Ticket` or an error; never a
//!   partially populated record.
//! - Fields are checked in `TicketField::ALL` order and the first failure
//!   is the one reported.
//! - Storage errors are surfaced unchanged and never retried.

use crate::model::ticket::{Ticket, TicketField};
use crate::properties::{Properties, PropertiesError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

const FILE_HEADER: &str = "lottery ticket";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for ticket load/save operations.
#[derive(Debug)]
pub enum RepoError {
    /// A stored field is missing or fails its rule.
    CorruptData {
        field: TicketField,
        value: Option<String>,
    },
    /// The file could not be parsed as properties text.
    Malformed(String),
    Io(io::Error),
}

impl RepoError {
    /// Whether the error describes bad stored content rather than I/O.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptData { .. } | Self::Malformed(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorruptData { field, value: None } => {
                write!(f, "corrupt ticket data: missing `{}`", field.key())
            }
            Self::CorruptData {
                field,
                value: Some(value),
            } => write!(
                f,
                "corrupt ticket data: invalid `{}` value `{value}`",
                field.key()
            ),
            Self::Malformed(message) => write!(f, "corrupt ticket data: {message}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::CorruptData { .. } | Self::Malformed(_) => None,
        }
    }
}

impl From<io::Error> for RepoError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<PropertiesError> for RepoError {
    fn from(value: PropertiesError) -> Self {
        match value {
            PropertiesError::Io(err) => Self::Io(err),
            malformed @ PropertiesError::Malformed { .. } => Self::Malformed(malformed.to_string()),
        }
    }
}

/// Repository interface for the single ticket record.
pub trait TicketRepository {
    fn load(&self) -> RepoResult<Ticket>;
    fn save(&self, ticket: &Ticket) -> RepoResult<()>;
}

/// Properties-file backed ticket repository.
#[derive(Debug, Clone)]
pub struct PropertiesTicketRepository {
    path: PathBuf,
}

impl PropertiesTicketRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TicketRepository for PropertiesTicketRepository {
    fn load(&self) -> RepoResult<Ticket> {
        let started_at = Instant::now();
        info!("event=ticket_load module=repo status=start");

        let result = Properties::load(&self.path)
            .map_err(RepoError::from)
            .and_then(|props| ticket_from_properties(&props));

        match &result {
            Ok(_) => info!(
                "event=ticket_load module=repo status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) if err.is_corrupt() => warn!(
                "event=ticket_load module=repo status=error duration_ms={} error_code=corrupt_data error={}",
                started_at.elapsed().as_millis(),
                err
            ),
            Err(err) => error!(
                "event=ticket_load module=repo status=error duration_ms={} error_code=io_failed error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }

        result
    }

    fn save(&self, ticket: &Ticket) -> RepoResult<()> {
        let started_at = Instant::now();
        info!("event=ticket_save module=repo status=start");

        let result = ticket_to_properties(ticket)
            .store(&self.path, Some(FILE_HEADER))
            .map_err(RepoError::from);

        match &result {
            Ok(()) => info!(
                "event=ticket_save module=repo status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=ticket_save module=repo status=error duration_ms={} error_code=io_failed error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }

        result
    }
}

/// Converts a ticket into its five namespaced entries.
pub fn ticket_to_properties(ticket: &Ticket) -> Properties {
    let mut props = Properties::new();
    for (field, value) in ticket.fields() {
        props.set(field.key(), value);
    }
    props
}

/// Rebuilds a ticket from namespaced entries, failing on the first missing
/// or invalid field. Unrelated keys are ignored.
pub fn ticket_from_properties(props: &Properties) -> RepoResult<Ticket> {
    let mut ticket = Ticket::default();
    for field in TicketField::ALL {
        let value = props
            .get(field.key())
            .ok_or(RepoError::CorruptData { field, value: None })?;
        ticket
            .set(field, value)
            .map_err(|err| RepoError::CorruptData {
                field: err.field,
                value: Some(err.value),
            })?;
    }
    Ok(ticket)
}
