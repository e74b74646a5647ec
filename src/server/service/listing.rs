//! Listing service assembling the public feed and owner/profile views.
//!
//! The public feed is built from two independent queries, premium-active and all-active,
//! merged with premium ads first and duplicates removed. The two queries are not wrapped in
//! a transaction, so a write landing between them can transiently duplicate or omit an ad
//! across the two reads; the merge still never emits an id twice.

use std::time::Instant;

use chrono::Utc;
use sea_orm::{DatabaseConnection, DbErr};

use crate::server::{
    data::ad::AdRepository,
    error::AppError,
    metrics::Metrics,
    model::ad::{merge_premium_first, order_by_bucket, Ad, ListAdsFilter, OwnerKey},
    util::username::normalize_username,
};

pub struct ListingService<'a> {
    db: &'a DatabaseConnection,
    metrics: &'a Metrics,
}

impl<'a> ListingService<'a> {
    /// Creates a new ListingService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `metrics` - Metrics receiving query durations
    ///
    /// # Returns
    /// - `ListingService` - New service instance
    pub fn new(db: &'a DatabaseConnection, metrics: &'a Metrics) -> Self {
        Self { db, metrics }
    }

    /// Lists effectively active ads matching the filter, premium ads first.
    ///
    /// # Arguments
    /// - `filter` - Normalized category, mode and tag filter
    ///
    /// # Returns
    /// - `Ok(Vec<Ad>)` - Premium ads by recency, then the remaining matches
    /// - `Err(AppError::DbErr)` - Either query failed; no partial result is returned
    pub async fn list_active(&self, filter: &ListAdsFilter) -> Result<Vec<Ad>, AppError> {
        let repo = AdRepository::new(self.db);
        let now = Utc::now();

        let filtered = self.timed(repo.find_active(filter, now)).await?;
        let premium = self.timed(repo.find_premium_active(filter, now)).await?;

        Ok(merge_premium_first(premium, filtered))
    }

    /// Lists every ad owned by the caller, active first, then expired, then the rest.
    ///
    /// # Arguments
    /// - `owner` - Client identity and, if numeric, owner identity of the caller
    ///
    /// # Returns
    /// - `Ok(Vec<Ad>)` - Union of client-identity and owner-identity matches
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn list_by_owner(&self, owner: &OwnerKey) -> Result<Vec<Ad>, AppError> {
        let mut ads = self
            .timed(AdRepository::new(self.db).find_by_owner(owner, Utc::now()))
            .await?;
        order_by_bucket(&mut ads);

        Ok(ads)
    }

    /// Lists every ad published under a username, with the same bucket order as owner listings.
    ///
    /// # Arguments
    /// - `raw_username` - Username from the request path, `@` prefix and case ignored
    ///
    /// # Returns
    /// - `Ok(Vec<Ad>)` - Ads with stale active rows reported as expired
    /// - `Err(AppError::BadRequest)` - Username empty after normalization
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn list_by_username(&self, raw_username: &str) -> Result<Vec<Ad>, AppError> {
        let Some(username) = normalize_username(raw_username) else {
            return Err(AppError::BadRequest("username is required".to_string()));
        };

        let mut ads = self
            .timed(AdRepository::new(self.db).find_by_username(&username, Utc::now()))
            .await?;
        order_by_bucket(&mut ads);

        Ok(ads)
    }

    async fn timed<T>(
        &self,
        query: impl std::future::Future<Output = Result<T, DbErr>>,
    ) -> Result<T, DbErr> {
        let started = Instant::now();
        let result = query.await;
        self.metrics.observe_query("select", started.elapsed());

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::ad::AdStatus;
    use chrono::Duration;
    use std::collections::HashSet;
    use test_utils::{builder::TestBuilder, factory::ad::AdFactory};

    /// Tests that a premium ad precedes a more recently updated regular ad.
    ///
    /// Expected: Ok with [premium, regular]
    #[tokio::test]
    async fn premium_precedes_newer_regular_ad() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_marketplace_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let metrics = Metrics::new().unwrap();

        let now = Utc::now();
        let premium = AdFactory::new(db)
            .category("electronics")
            .premium(true)
            .updated_at(now - Duration::hours(1))
            .build()
            .await?;
        let regular = AdFactory::new(db)
            .category("electronics")
            .updated_at(now)
            .build()
            .await?;

        let service = ListingService::new(db, &metrics);
        let ads = service
            .list_active(&ListAdsFilter::new(Some("electronics"), None, None))
            .await
            .unwrap();

        let ids: Vec<i32> = ads.iter().map(|ad| ad.id).collect();
        assert_eq!(ids, vec![premium.id, regular.id]);

        Ok(())
    }

    /// Tests that premium ads matching both queries appear exactly once.
    ///
    /// Expected: Ok with every id unique and all premium ads ahead of regular ones
    #[tokio::test]
    async fn merged_feed_has_no_duplicates() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_marketplace_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let metrics = Metrics::new().unwrap();

        let now = Utc::now();
        for hours in 0..3 {
            AdFactory::new(db)
                .premium(true)
                .updated_at(now - Duration::hours(hours))
                .build()
                .await?;
            AdFactory::new(db)
                .updated_at(now - Duration::minutes(30 + hours * 60))
                .build()
                .await?;
        }

        let service = ListingService::new(db, &metrics);
        let ads = service.list_active(&ListAdsFilter::default()).await.unwrap();

        let unique: HashSet<i32> = ads.iter().map(|ad| ad.id).collect();
        assert_eq!(ads.len(), 6);
        assert_eq!(unique.len(), 6);
        assert!(ads[..3].iter().all(|ad| ad.is_premium));
        assert!(ads[3..].iter().all(|ad| !ad.is_premium));

        Ok(())
    }

    /// Tests that a stale active row is repaired on the profile and hidden from the feed.
    ///
    /// Expected: Ok with the ad reported as expired by username and absent from the feed
    #[tokio::test]
    async fn stale_active_ad_reads_as_expired() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_marketplace_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let metrics = Metrics::new().unwrap();

        let stale = AdFactory::new(db)
            .username("foo")
            .status("active")
            .expires_at(Utc::now() - Duration::days(1))
            .build()
            .await?;

        let service = ListingService::new(db, &metrics);

        let profile = service.list_by_username("foo").await.unwrap();
        assert_eq!(profile.len(), 1);
        assert_eq!(profile[0].id, stale.id);
        assert_eq!(profile[0].status, AdStatus::Expired);
        assert_eq!(profile[0].clone().into_dto().status, "expired");

        let feed = service.list_active(&ListAdsFilter::default()).await.unwrap();
        assert!(feed.iter().all(|ad| ad.id != stale.id));

        Ok(())
    }

    /// Tests that `@Foo ` and `foo` resolve to the same profile.
    ///
    /// Expected: Ok with identical results for both spellings
    #[tokio::test]
    async fn username_lookup_is_normalized() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_marketplace_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let metrics = Metrics::new().unwrap();

        let ad = AdFactory::new(db).username("Foo").build().await?;
        AdFactory::new(db).username("bar").build().await?;

        let service = ListingService::new(db, &metrics);
        let decorated = service.list_by_username("@Foo ").await.unwrap();
        let plain = service.list_by_username("foo").await.unwrap();

        assert_eq!(decorated.len(), 1);
        assert_eq!(decorated[0].id, ad.id);
        assert_eq!(decorated, plain);

        Ok(())
    }

    /// Tests that a username that normalizes to nothing is rejected.
    ///
    /// Expected: Err(BadRequest)
    #[tokio::test]
    async fn empty_username_is_bad_request() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_marketplace_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let metrics = Metrics::new().unwrap();

        let service = ListingService::new(db, &metrics);
        let result = service.list_by_username(" @ ").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));

        Ok(())
    }

    /// Tests bucket ordering of owner listings regardless of timestamps.
    ///
    /// Expected: Ok with [active, expired, removed]
    #[tokio::test]
    async fn owner_listing_orders_by_bucket() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_marketplace_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let metrics = Metrics::new().unwrap();

        let now = Utc::now();
        let removed = AdFactory::new(db)
            .user_id(42)
            .client_id("42")
            .status("removed")
            .updated_at(now)
            .build()
            .await?;
        let active = AdFactory::new(db)
            .user_id(42)
            .client_id("42")
            .updated_at(now - Duration::days(2))
            .build()
            .await?;
        let expired = AdFactory::new(db)
            .user_id(42)
            .client_id("42")
            .status("expired")
            .updated_at(now - Duration::hours(1))
            .build()
            .await?;

        let service = ListingService::new(db, &metrics);
        let owner = OwnerKey::parse("42").unwrap();
        let ads = service.list_by_owner(&owner).await.unwrap();

        let ids: Vec<i32> = ads.iter().map(|ad| ad.id).collect();
        assert_eq!(ids, vec![active.id, expired.id, removed.id]);

        Ok(())
    }
}
