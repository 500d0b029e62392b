//! Provider layer
//!
//! REST client for the generative video provider's long-running operations
//! and the translation between its wire format and the proxy's.

pub mod client;
pub mod error;
pub mod types;

pub use client::ProviderClient;
pub use error::ProviderError;
