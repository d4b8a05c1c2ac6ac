//! `foodnova-auth` — client-side session and role gating.
//!
//! Nothing here is an authorization decision: the API re-checks every request.
//! The role decoded from a token only decides which screens are offered.

pub mod claims;
pub mod guard;
pub mod roles;
pub mod session;

pub use claims::{TokenClaims, TokenError, decode_claims, validate_expiry};
pub use guard::{GuardOutcome, guard_admin, guard_customer};
pub use roles::{Role, role};
pub use session::{Session, UserProfile};
