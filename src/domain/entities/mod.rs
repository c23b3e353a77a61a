//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A generated code mapped to an original URL
//! - [`AboutPage`] - The single editable "About" document
//! - [`Principal`] - The authenticated caller and its [`Role`]s
//!
//! Creation inputs live in separate structs (`NewShortLink`) so that store-assigned
//! fields (`id`, `version`) never have to be invented by callers.

pub mod about_page;
pub mod principal;
pub mod short_link;

pub use about_page::AboutPage;
pub use principal::{Principal, Role};
pub use short_link::{NewShortLink, ShortLink};
