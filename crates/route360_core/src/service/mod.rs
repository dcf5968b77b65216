//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and pure `globe` logic into view-level
//!   operations.
//! - Keep CLI/UI callers decoupled from storage keys and JSON shapes.

pub mod account_service;
pub mod globe_service;
pub mod journal_session;
pub mod trip_service;
