//! `foodnova-client`
//!
//! **Responsibility:** the storefront and admin client.
//!
//! This crate provides:
//! - A typed HTTP client for every storefront and admin endpoint
//! - Durable local storage for the session token, cart and preferences
//! - Explicit context objects built from that storage
//! - Headless screens: browse, checkout, order viewer, admin review,
//!   dashboard and catalog management
//!
//! The API stays the authority. Roles decoded on the client only gate which
//! screens are offered.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod screens;
pub mod store;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use context::{AppContext, CartContext, Preferences, SessionContext, Theme};
pub use error::{ClientError, ClientResult};
pub use store::LocalStore;
