//! WordPress admin console HTTP server library.
//!
//! Exposes the building blocks (config, state, auth subsystem, routes,
//! middleware, background tasks) so integration tests and the binary
//! entrypoint can both access them.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod mailer;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
