use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public view of a listing.
///
/// `client_id` and `user_id` are only populated for the owner's own listing view and are
/// omitted from the JSON body everywhere else.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct AdDto {
    pub id: i32,
    pub username: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub mode: String,
    pub tag: String,
    /// Derived status: `active`, `expired` or `removed`.
    pub status: String,
    pub is_premium: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}
