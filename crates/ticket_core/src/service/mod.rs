//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into import/export use cases.
//! - Keep front ends decoupled from storage details.

pub mod ticket_service;
