//! Business logic services for the application layer.

pub mod about_service;
pub mod auth_service;
pub mod link_service;

pub use about_service::AboutService;
pub use auth_service::AuthService;
pub use link_service::LinkService;
