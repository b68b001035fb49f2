//! # Route Modules
//!
//! Each module exposes a `router()` returning `Router<AppState>`; they are
//! merged in [`crate::app`].

pub mod accounts;
pub mod assets;
