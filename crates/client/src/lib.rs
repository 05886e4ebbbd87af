//! Orchard client library.
//!
//! Everything the storefront and admin front ends need to talk to the
//! remote Orchard API: the HTTP client, configuration, the session and
//! cart state holders, notification plumbing, and the local token/wishlist
//! store.
//!
//! # Architecture
//!
//! The remote API owns all business logic (pricing, stock, order
//! lifecycle, authentication). This crate is a thin, well-typed consumer:
//! every local copy of server data is a cache replaced wholesale by the
//! next response.
//!
//! State holders are explicitly constructed and passed by reference - no
//! ambient globals. The [`session::Session`] broadcasts identity changes
//! on a watch channel; the [`cart::CartState`] subscribes and re-fetches.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod assets;
pub mod cart;
pub mod config;
pub mod error;
pub mod notify;
pub mod session;
pub mod store;

pub use api::ApiClient;
pub use cart::CartState;
pub use config::ClientConfig;
pub use error::ApiError;
pub use session::Session;
