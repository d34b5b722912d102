//! Core types for Campus.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use role::{CanonicalRole, admin_role_code, canonicalize, mentions_admin};
pub use status::*;
