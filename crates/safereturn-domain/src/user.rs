//! User domain types.

use serde::{Deserialize, Serialize};

/// User permission level.
///
/// Wire format: `u8` (0 = User, 1 = Admin), carried in JWT claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User = 0,
    Admin = 1,
}

impl UserRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::User),
            1 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether this role may perform review/administration operations.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Review status of a user's identity-verification document.
///
/// Only `approved` users may submit cases. Mutated by admin review
/// (`pending → approved | rejected`) or by re-submission
/// (`not_uploaded | rejected → pending`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    NotUploaded,
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotUploaded => "not_uploaded",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "not_uploaded" => Some(Self::NotUploaded),
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether the user may submit missing-person cases.
    pub fn can_submit_cases(self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Whether a new document submission is accepted in this state.
    pub fn accepts_submission(self) -> bool {
        matches!(self, Self::NotUploaded | Self::Rejected)
    }
}
