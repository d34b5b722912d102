//! Domain models for the Campus API.

pub mod accounts;
pub mod announcement;
pub mod identity;

pub use accounts::{AdminAccount, FacultyAccount, FacultyProfile, StudentAccount, StudentProfile};
pub use announcement::Announcement;
pub use identity::{Identity, IdentityKind};
