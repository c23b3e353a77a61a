//! HTML template rendering handlers for the web pages.

mod about;
mod account;
mod error;
mod links;

pub use about::{about_handler, edit_about_handler};
pub use account::{login_handler, login_page_handler, logout_handler};
pub use error::WebError;
pub use links::{
    create_handler, create_page_handler, delete_handler, delete_page_handler, details_handler,
    edit_handler, edit_page_handler, index_handler,
};
