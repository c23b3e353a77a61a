//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries are
//! prepared statements bound at runtime and mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgShortLinkRepository`] - Short link storage, redirect counting and versioned edits
//! - [`PgAboutRepository`] - About page storage
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_about_repository;
pub mod pg_short_link_repository;
pub mod pg_token_repository;

pub use pg_about_repository::PgAboutRepository;
pub use pg_short_link_repository::PgShortLinkRepository;
pub use pg_token_repository::PgTokenRepository;
