//! In-process repository implementations.
//!
//! Backed by `tokio::sync::RwLock`-guarded collections. They enforce the same
//! invariants as the PostgreSQL repositories (unique short codes, atomic redirect
//! counting, versioned edits) and are used by integration tests and local runs
//! without a database.

pub mod about_repository;
pub mod short_link_repository;
pub mod token_repository;

pub use about_repository::InMemoryAboutRepository;
pub use short_link_repository::InMemoryShortLinkRepository;
pub use token_repository::InMemoryTokenRepository;
