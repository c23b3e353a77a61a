//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern. Services receive
//! them by constructor injection; nothing in the application layer reaches for a global
//! store.
//!
//! # Implementations
//!
//! - PostgreSQL: `crate::infrastructure::persistence`
//! - In-memory: `crate::infrastructure::memory`
//! - Mock implementations are auto-generated via `mockall` for unit tests
//!
//! # Available Repositories
//!
//! - [`ShortLinkRepository`] - Short link CRUD, lookup and redirect counting
//! - [`AboutRepository`] - About page storage
//! - [`TokenRepository`] - API token authentication

pub mod about_repository;
pub mod short_link_repository;
pub mod token_repository;

pub use about_repository::AboutRepository;
pub use short_link_repository::ShortLinkRepository;
pub use token_repository::{ApiToken, NewApiToken, TokenRepository};

#[cfg(test)]
pub use about_repository::MockAboutRepository;
#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
