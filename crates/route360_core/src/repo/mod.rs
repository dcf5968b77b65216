//! Repository contracts over the key-value store.
//!
//! # Responsibility
//! - Map stored JSON collections to typed records and back.
//! - Keep storage keys and encoding out of the service layer.
//!
//! # Invariants
//! - Trip writes enforce `Trip::validate()` before persistence.
//! - Unreadable stored collections read as empty.

mod error;

pub mod account_repo;
pub mod trip_repo;
pub mod visited_repo;

pub use account_repo::{AccountRepository, KvAccountRepository};
pub use error::{RepoError, RepoResult};
pub use trip_repo::{KvTripRepository, TripRepository};
pub use visited_repo::{KvVisitedCountryRepository, VisitedCountryRepository};
