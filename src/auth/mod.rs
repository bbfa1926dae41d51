//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionManager`: the session state machine (sign in, sign up, sign out,
//!   startup restore) with watch-channel state notifications
//! - `TokenStore` and its file, keychain, and in-memory backends
//!
//! Tokens and the serialized profile are persisted together on sign-in and
//! removed together on sign-out.

pub mod session;
pub mod store;

pub use session::{Session, SessionManager, SessionState};
pub use store::{
    FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore, ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY, USER_INFO_KEY,
};
