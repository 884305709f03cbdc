//! Case and sighting status state machines.
//!
//! Statuses are stored as strings (the wire values below) but handled as
//! closed enums everywhere in the service; controllers validate transitions
//! against the explicit tables here instead of overwriting blindly.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a missing-person case.
///
/// Allowed transitions: `pending → {approved, rejected}`,
/// `approved → {resolved}`. Everything else is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Pending,
    Approved,
    Rejected,
    Resolved,
}

impl CaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Resolved => "resolved",
        }
    }

    /// Parse a stored wire value. Returns `None` for unknown strings.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }

    /// Whether `self → next` is an allowed lifecycle transition.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved)
                | (Self::Pending, Self::Rejected)
                | (Self::Approved, Self::Resolved)
        )
    }
}

/// Review status of a sighting.
///
/// One table backs both sighting kinds, so one enum covers both
/// vocabularies. Linked sightings use `pending | verified | false | helpful`;
/// general sightings use `pending | matched | new_case | irrelevant`. The
/// controllers enforce the per-kind subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SightingStatus {
    Pending,
    Verified,
    False,
    Helpful,
    Matched,
    NewCase,
    Irrelevant,
}

impl SightingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::False => "false",
            Self::Helpful => "helpful",
            Self::Matched => "matched",
            Self::NewCase => "new_case",
            Self::Irrelevant => "irrelevant",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "false" => Some(Self::False),
            "helpful" => Some(Self::Helpful),
            "matched" => Some(Self::Matched),
            "new_case" => Some(Self::NewCase),
            "irrelevant" => Some(Self::Irrelevant),
            _ => None,
        }
    }

    /// Statuses an admin may set when reviewing a *linked* sighting.
    pub fn is_linked_review(self) -> bool {
        matches!(self, Self::Verified | Self::False | Self::Helpful)
    }

    /// Linked review outcomes that make the sighting publicly visible.
    pub fn grants_public_visibility(self) -> bool {
        matches!(self, Self::Verified | Self::Helpful)
    }

    /// Terminal statuses of the general-sighting resolution flow.
    pub fn is_general_resolution(self) -> bool {
        matches!(self, Self::Matched | Self::NewCase | Self::Irrelevant)
    }
}

/// Condition of the person at the time of the sighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonCondition {
    Healthy,
    Injured,
    Confused,
    WithSomeone,
    Other,
}

impl Default for PersonCondition {
    fn default() -> Self {
        Self::Healthy
    }
}

impl PersonCondition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Injured => "injured",
            Self::Confused => "confused",
            Self::WithSomeone => "with_someone",
            Self::Other => "other",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "healthy" => Some(Self::Healthy),
            "injured" => Some(Self::Injured),
            "confused" => Some(Self::Confused),
            "with_someone" => Some(Self::WithSomeone),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}
