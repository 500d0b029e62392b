//! Service Module
//!
//! Business logic layer for the proxy.
//! Services check the credential, validate what callers send and hand the
//! provider calls to the provider client.

pub mod video;

// Re-export for convenience
pub use video as video_service;
