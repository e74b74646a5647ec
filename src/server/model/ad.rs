//! Listing domain models.
//!
//! An ad's stored status column lags reality: a background process eventually flips expired
//! rows, but until then every read path derives the status from the expiration timestamp
//! through [`effective_status`]. This module also holds the pure ordering rules used by the
//! listing service so they can be tested without a store.

use std::{cmp::Reverse, collections::HashSet};

use chrono::{DateTime, Utc};

use crate::model::ad::AdDto;

/// Category whose single implicit mode makes the mode filter meaningless.
pub const OTHER_CATEGORY: &str = "other";

/// Tag value meaning "do not filter by tag", compared case-insensitively.
pub const ALL_TAGS: &str = "all";

/// Lifecycle status of an ad as shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdStatus {
    Active,
    Expired,
    Removed,
}

impl AdStatus {
    /// Decodes the stored status column.
    ///
    /// Any value other than `active` or `expired` decodes as `Removed`, which places it in
    /// the last ordering bucket.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            "expired" => Self::Expired,
            _ => Self::Removed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Removed => "removed",
        }
    }

    /// Ordering bucket for owner and profile listings: active, then expired, then the rest.
    fn bucket(&self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Expired => 1,
            Self::Removed => 2,
        }
    }
}

/// Derives the authoritative status of an ad at `now`.
///
/// An ad is active only if its stored status is `active` and it expires strictly after
/// `now`. A stored `active` past its expiration reads as `Expired`.
///
/// # Arguments
/// - `stored` - Raw value of the status column
/// - `expires_at` - Expiration timestamp of the ad
/// - `now` - Instant the read is evaluated at
///
/// # Returns
/// - `AdStatus` - Status every read path must report
pub fn effective_status(stored: &str, expires_at: DateTime<Utc>, now: DateTime<Utc>) -> AdStatus {
    match AdStatus::from_stored(stored) {
        AdStatus::Active if expires_at > now => AdStatus::Active,
        AdStatus::Active => AdStatus::Expired,
        other => other,
    }
}

/// Stored reference to an ad's media on the external file host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoRef {
    /// Relative path on the file host, already stripped of one leading `/`.
    Path(String),
    /// Opaque file handle that must be resolved to a path first.
    Handle(String),
    None,
}

impl PhotoRef {
    /// Picks the reference to use from the two nullable photo columns.
    ///
    /// A non-empty direct path always wins over a handle. Blank values count as absent.
    pub fn from_columns(photo_path: Option<String>, photo_id: Option<String>) -> Self {
        let path = photo_path
            .as_deref()
            .map(str::trim)
            .map(|path| path.strip_prefix('/').unwrap_or(path))
            .filter(|path| !path.is_empty())
            .map(str::to_string);

        if let Some(path) = path {
            return Self::Path(path);
        }

        match photo_id.map(|id| id.trim().to_string()) {
            Some(id) if !id.is_empty() => Self::Handle(id),
            _ => Self::None,
        }
    }
}

/// Listing with its status already derived for the read instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Ad {
    pub id: i32,
    /// Numeric owner identity.
    pub user_id: i64,
    /// Client identity recorded at creation, may diverge from `user_id`.
    pub client_id: String,
    pub username: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub mode: String,
    pub tag: String,
    pub photo: PhotoRef,
    pub is_premium: bool,
    pub status: AdStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ad {
    /// Converts an entity model to an ad domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    /// - `now` - Read instant used to derive the effective status
    ///
    /// # Returns
    /// - `Ad` - The converted ad with its effective status
    pub fn from_entity(entity: entity::ad::Model, now: DateTime<Utc>) -> Self {
        let status = effective_status(&entity.status, entity.expires_at, now);

        Self {
            id: entity.id,
            user_id: entity.user_id,
            client_id: entity.client_id,
            username: entity.username,
            title: entity.title,
            description: entity.description,
            category: entity.category,
            mode: entity.mode,
            tag: entity.tag,
            photo: PhotoRef::from_columns(entity.photo_path, entity.photo_id),
            is_premium: entity.is_premium,
            status,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts the ad into its public view, without owner identities or photo references.
    pub fn into_dto(self) -> AdDto {
        AdDto {
            id: self.id,
            username: self.username,
            title: self.title,
            description: self.description,
            category: self.category,
            mode: self.mode,
            tag: self.tag,
            status: self.status.as_str().to_string(),
            is_premium: self.is_premium,
            expires_at: self.expires_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            client_id: None,
            user_id: None,
        }
    }

    /// Converts the ad into the owner's view, which also carries the owner key.
    pub fn into_owner_dto(self) -> AdDto {
        let client_id = self.client_id.clone();
        let user_id = self.user_id;

        AdDto {
            client_id: Some(client_id),
            user_id: Some(user_id),
            ..self.into_dto()
        }
    }
}

/// Filter for the public listing feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAdsFilter {
    pub category: Option<String>,
    pub mode: Option<String>,
    pub tag: Option<String>,
}

impl ListAdsFilter {
    /// Normalizes raw query parameters into a filter.
    ///
    /// Values are trimmed and blank values dropped. The mode is dropped for the `other`
    /// category and a tag of `all` (any case) means no tag filter.
    ///
    /// # Arguments
    /// - `category` - Raw `cat` query parameter
    /// - `mode` - Raw `mode` query parameter
    /// - `tag` - Raw `tag` query parameter
    ///
    /// # Returns
    /// - `ListAdsFilter` - Filter applied identically to both listing queries
    pub fn new(category: Option<&str>, mode: Option<&str>, tag: Option<&str>) -> Self {
        fn clean(value: Option<&str>) -> Option<String> {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        }

        let category = clean(category);
        let mode = clean(mode).filter(|_| category.as_deref() != Some(OTHER_CATEGORY));
        let tag = clean(tag).filter(|tag| !tag.eq_ignore_ascii_case(ALL_TAGS));

        Self {
            category,
            mode,
            tag,
        }
    }
}

/// Caller-supplied identity used to find "my ads".
///
/// Matches ads whose `client_id` equals the raw value, and additionally ads whose
/// `user_id` equals it when the value parses as an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerKey {
    pub client_id: String,
    pub user_id: Option<i64>,
}

impl OwnerKey {
    /// Builds an owner key from the raw `user_id` query parameter.
    ///
    /// # Returns
    /// - `Some(OwnerKey)` - Value present after trimming
    /// - `None` - Value missing or blank
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        Some(Self {
            client_id: raw.to_string(),
            user_id: raw.parse::<i64>().ok(),
        })
    }
}

/// Merges the premium query result in front of the general query result.
///
/// Emits `premium` in its own order, then every ad of `filtered` whose id was not already
/// emitted, in `filtered`'s order. No id appears twice in the output.
///
/// # Arguments
/// - `premium` - Premium active ads ordered by recency
/// - `filtered` - All active ads matching the filter
///
/// # Returns
/// - `Vec<Ad>` - Combined feed with premium ads first
pub fn merge_premium_first(premium: Vec<Ad>, filtered: Vec<Ad>) -> Vec<Ad> {
    let mut seen = HashSet::with_capacity(premium.len() + filtered.len());
    let mut merged = Vec::with_capacity(premium.len() + filtered.len());

    for ad in premium.into_iter().chain(filtered) {
        if seen.insert(ad.id) {
            merged.push(ad);
        }
    }

    merged
}

/// Orders ads active first, then expired, then everything else.
///
/// Within a bucket the most recently updated ad comes first, with the higher id winning
/// ties.
pub fn order_by_bucket(ads: &mut [Ad]) {
    ads.sort_by_key(|ad| (ad.status.bucket(), Reverse(ad.updated_at), Reverse(ad.id)));
}
