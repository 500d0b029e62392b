//! Data Transfer Objects for client/proxy communication
//!
//! DTOs mirror the JSON bodies accepted and returned by the proxy endpoints.

pub mod error;
pub mod video;
