//! Data types shared between the API client and the session manager.

pub mod product;
pub mod user;

pub use product::{Category, Product};
pub use user::{NewUser, TokenPair, UserProfile};
