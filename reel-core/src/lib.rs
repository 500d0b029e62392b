//! Reel Core
//!
//! Core types and abstractions for the Reel video generation proxy.
//!
//! This crate contains:
//! - Domain types: generation requests, long-running operations and results
//! - DTOs: request bodies exchanged between the client and the proxy
//! - Prompt composition and payload building for the job submitter

pub mod domain;
pub mod dto;
pub mod prompt;
