//! User and blacklist domain models.

use chrono::{DateTime, Utc};

use crate::model::blacklist::{BlacklistEntryDto, ScammerCheckDto};

const SAFE_MESSAGE: &str = "User has not been seen in fraudulent schemes";
const FLAGGED_MESSAGE: &str = "Warning! Known scammer";

/// Marketplace participant with its moderation flag.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Whether the user is on the blacklist.
    pub is_scammer: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            is_scammer: entity.is_scammer,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts a flagged user into its public blacklist entry.
    pub fn into_blacklist_dto(self) -> BlacklistEntryDto {
        BlacklistEntryDto {
            username: self.username,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Result of checking a username against the blacklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScammerCheck {
    /// No flagged user with that name exists.
    Safe,
    /// The username belongs to a flagged user.
    Flagged,
}

impl ScammerCheck {
    pub fn into_dto(self) -> ScammerCheckDto {
        match self {
            Self::Safe => ScammerCheckDto {
                safe: true,
                msg: SAFE_MESSAGE.to_string(),
            },
            Self::Flagged => ScammerCheckDto {
                safe: false,
                msg: FLAGGED_MESSAGE.to_string(),
            },
        }
    }
}
