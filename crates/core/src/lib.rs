//! Orchard Core - Shared types and derivation logic.
//!
//! This crate provides the common vocabulary used across all Orchard
//! components:
//! - `client` - HTTP client and state holders for the storefront API
//! - `cli` - Command-line storefront and admin console
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Every entity here mirrors a JSON shape owned by the remote API;
//! local copies are snapshots, never authoritative state.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, roles, and status enums
//! - [`models`] - Wire-level entities (users, products, carts, orders, ...)
//! - [`shipping`] - The shared shipping-cost rule
//! - [`catalog`] - Category grouping and product filtering
//! - [`orders`] - Order-cancellation policy and the status display machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod models;
pub mod orders;
pub mod shipping;
pub mod types;

pub use models::*;
pub use types::*;
