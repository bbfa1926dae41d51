//! Shopfront - a storefront API client with token-based session management.
//!
//! The crate centers on [`auth::SessionManager`], which owns the process-wide
//! authentication state: it exchanges credentials with the remote API,
//! persists tokens through a pluggable [`auth::TokenStore`], restores the
//! session at startup (validate, then refresh, then give up), and publishes
//! every state change on a watch channel for UI or navigation layers to react
//! to. [`api::ApiClient`] covers the rest of the storefront surface (product
//! catalog, registration), and [`cart::Cart`] holds local cart state.

pub mod api;
pub mod auth;
pub mod cart;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError, AuthApi};
pub use auth::{Session, SessionManager, SessionState, TokenStore};
pub use cart::{Cart, CartItem};
pub use config::Config;
pub use models::{NewUser, Product, TokenPair, UserProfile};
