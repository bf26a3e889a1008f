//! WordPress REST gateway.
//!
//! The only system of record for posts, categories, users, and media is a
//! WordPress instance reached over its `wp-json/wp/v2` REST interface. This
//! crate wraps that interface in a typed client: [`WpClient`] handles
//! authentication and error mapping, and the per-entity API structs
//! ([`PostsApi`], [`MediaApi`], [`CategoriesApi`], [`UsersApi`]) expose the
//! operations the admin console needs.
//!
//! Upstream error detail (message/code) is preserved in [`WpError`] for
//! server-side logging but is never surfaced verbatim to browsers; the HTTP
//! crate maps it to a generic message.

pub mod client;
pub mod config;
pub mod error;
pub mod media;
pub mod models;
pub mod posts;
pub mod taxonomy;

pub use client::WpClient;
pub use config::WpConfig;
pub use error::WpError;
pub use media::MediaApi;
pub use models::{
    MediaFilters, Period, PostFilters, PostInput, WpCategory, WpMedia, WpPage,
    WpPost, WpRendered, WpUser,
};
pub use posts::PostsApi;
pub use taxonomy::{CategoriesApi, UsersApi};
