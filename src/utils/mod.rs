//! Utility functions for code generation, URL processing, and database error handling.
//!
//! - [`code_generator`] - Hash-based short code generation with collision retry
//! - [`url_normalizer`] - Scheme normalization and target URL validation
//! - [`clock`] - Injectable time source
//! - [`db_error`] - Database constraint inspection

pub mod clock;
pub mod code_generator;
pub mod db_error;
pub mod url_normalizer;
