//! Reel Proxy
//!
//! Thin HTTP proxy between the browser UI and the generative video provider.
//!
//! Architecture:
//! - Configuration: provider credential and bind address from the environment
//! - API: axum handlers for the three proxy endpoints plus a health check
//! - Service: credential checks and request/response translation
//! - Provider: REST client for the provider's long-running operations
//!
//! The provider credential stays in this process; callers only ever see
//! operation handles and video bytes.

pub mod api;
pub mod config;
pub mod provider;
pub mod service;
pub mod state;
