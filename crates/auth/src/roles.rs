use serde::{Deserialize, Serialize};

use crate::claims::decode_claims;

/// Role as understood by the client.
///
/// `Unknown` covers missing, malformed or unrecognised role claims; it is never
/// treated as either customer or admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn from_claim(raw: &str) -> Self {
        match raw {
            "customer" => Role::Customer,
            "admin" => Role::Admin,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
            Role::Unknown => "unknown",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the UI role from a bearer token's payload.
///
/// Pure: reads the `role` claim without verifying the signature.
pub fn role(token: &str) -> Role {
    match decode_claims(token) {
        Ok(claims) => claims.role.as_deref().map(Role::from_claim).unwrap_or(Role::Unknown),
        Err(_) => Role::Unknown,
    }
}
