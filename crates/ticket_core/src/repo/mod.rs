//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the load/save contract for the ticket record.
//! - Isolate storage format details from service orchestration.
//!
//! # Invariants
//! - Read paths reject invalid persisted state instead of masking it.
//! - Write paths only ever receive an already-valid `Ticket`.

pub mod ticket_repo;
