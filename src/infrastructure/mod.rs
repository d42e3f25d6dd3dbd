//! Infrastructure layer providing external service integrations.
//!
//! Blob storage for the cart, the TOML configuration file, and the
//! system link opener and clipboard.

pub mod persistence;
pub mod config;
pub mod launcher;

pub use persistence::*;
pub use config::*;
pub use launcher::*;
