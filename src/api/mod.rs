//! API client for the storefront REST API.
//!
//! `ApiClient` speaks the real HTTP endpoints; the session manager consumes
//! it through the `AuthApi` trait so tests can substitute a scripted fake.

pub mod client;
pub mod error;

use async_trait::async_trait;

use crate::models::{NewUser, TokenPair, UserProfile};

pub use client::ApiClient;
pub use error::ApiError;

/// Authentication endpoints consumed by the session manager.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token pair.
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError>;

    /// Fetch the profile belonging to an access token.
    /// Also serves as the token validity check.
    async fn profile(&self, access_token: &str) -> Result<UserProfile, ApiError>;

    /// Exchange a refresh token for a new token pair.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError>;

    /// Create a new account. Does not establish a session.
    async fn register(&self, new_user: &NewUser) -> Result<UserProfile, ApiError>;
}
