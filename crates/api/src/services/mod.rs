//! Service layer.
//!
//! Services own the policy: the resolution cascade, announcement
//! visibility, and token issuance. Repositories stay dumb; handlers stay
//! thin.

pub mod announcements;
pub mod auth;
pub mod tokens;

pub use announcements::{AnnouncementScope, AnnouncementService};
pub use auth::{AuthError, AuthService, IdentityStores};
pub use tokens::{TokenError, TokenIssuer};
