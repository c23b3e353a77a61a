//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and authorization rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, resolution and editing
//! - [`services::about_service::AboutService`] - About page reads and admin edits
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
