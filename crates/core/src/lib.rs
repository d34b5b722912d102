//! Campus Core - Shared types library.
//!
//! This crate provides common types used across all Campus components:
//! - `api` - HTTP service (identity resolution, announcements)
//! - `cli` - Command-line tools for migrations and account provisioning
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, account statuses, and role
//!   canonicalization

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
