//! Core domain types
//!
//! This module contains the core domain structures used across Reel crates.
//! They are shared between the proxy (which relays them to the provider) and
//! the client (which drives the submit/poll/download workflow).

pub mod operation;
pub mod request;
pub mod video;
