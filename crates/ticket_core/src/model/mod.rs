//! Ticket domain model.
//!
//! # Responsibility
//! - Define the single record the application edits, imports and exports.
//! - Own the field table that maps each field to its rule, default and key.
//!
//! # Invariants
//! - A `Ticket` never holds a field value that fails its rule.
//! - Storage keys are declared once, in `TicketField::key`.

pub mod ticket;
