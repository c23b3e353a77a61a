//! Server-rendered HTML pages.
//!
//! Uses Askama templates (`templates/`) for server-side rendering. Pages share
//! the services used by the JSON API; authentication uses the `auth_token` cookie.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Cookie authentication
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
