//! Admin surface: CRUD over users, templates, and stored requests.
//! Every handler authenticates through the `AdminUser` extractor.

pub mod requests;
pub mod templates;
pub mod users;
