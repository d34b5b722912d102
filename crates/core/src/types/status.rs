//! Status enums for account entities.

use serde::{Deserialize, Serialize};

/// Faculty/student account status.
///
/// Only `active` accounts may resolve through the login cascade. The
/// status is checked after password verification, never before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
    OnLeave,
}

impl AccountStatus {
    /// Whether this account may authenticate.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::OnLeave => write!(f, "on_leave"),
        }
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "on_leave" => Ok(Self::OnLeave),
            _ => Err(format!("invalid account status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_is_active() {
        assert!(AccountStatus::Active.is_active());
        assert!(!AccountStatus::Inactive.is_active());
        assert!(!AccountStatus::OnLeave.is_active());
    }

    #[test]
    fn test_display_from_str_roundtrip() {
        for status in [
            AccountStatus::Active,
            AccountStatus::Inactive,
            AccountStatus::OnLeave,
        ] {
            let parsed: AccountStatus = status.to_string().parse().expect("roundtrip");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("suspended".parse::<AccountStatus>().is_err());
    }
}
