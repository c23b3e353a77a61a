//! Domain layer containing business entities and repository contracts.
//!
//! This module is independent of infrastructure concerns: it defines what a short link,
//! an about page and an authenticated principal are, and the repository traits the
//! application layer talks to.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod repositories;
