//! HTTP front end for the alias registry.
//!
//! Routes `POST /url` and `DELETE /url/{alias}` (basic auth) and the public
//! `GET /{alias}` redirect onto the registry's capability traits.

pub mod app;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use auth::Credentials;
pub use state::AppState;
