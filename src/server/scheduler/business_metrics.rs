use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::{ad::AdRepository, user::UserRepository},
    error::AppError,
    metrics::{BusinessSnapshot, Metrics},
};

/// Cron expression of the refresh job: every 30 seconds.
const REFRESH_SCHEDULE: &str = "*/30 * * * * *";

/// Starts the business gauge scheduler
///
/// Refreshes `ads_total`, `ads_active`, `ads_premium`, `users_total` and `users_scammers`
/// every 30 seconds, and once immediately so the first scrape is populated.
///
/// # Arguments
/// - `db`: Database connection
/// - `metrics`: Metrics whose business gauges are replaced on every run
pub async fn start_scheduler(db: DatabaseConnection, metrics: Arc<Metrics>) -> Result<(), AppError> {
    if let Err(e) = refresh_business_metrics(&db, &metrics).await {
        tracing::error!("Error refreshing business metrics: {}", e);
    }

    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(REFRESH_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();
        let metrics = metrics.clone();

        Box::pin(async move {
            if let Err(e) = refresh_business_metrics(&db, &metrics).await {
                tracing::error!("Error refreshing business metrics: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Business metrics scheduler started");

    Ok(())
}

/// Counts ads and users and publishes the snapshot to the gauges
async fn refresh_business_metrics(db: &DatabaseConnection, metrics: &Metrics) -> Result<(), AppError> {
    let snapshot = collect_snapshot(db).await?;
    metrics.set_business(snapshot);

    Ok(())
}

async fn collect_snapshot(db: &DatabaseConnection) -> Result<BusinessSnapshot, AppError> {
    let ads = AdRepository::new(db);
    let users = UserRepository::new(db);
    let now = Utc::now();

    Ok(BusinessSnapshot {
        ads_total: ads.count_all().await?,
        ads_active: ads.count_active(false, now).await?,
        ads_premium: ads.count_active(true, now).await?,
        users_total: users.count_all().await?,
        users_scammers: users.count_scammers().await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sea_orm::DbErr;
    use test_utils::{
        builder::TestBuilder,
        factory::{ad::AdFactory, user::UserFactory},
    };

    /// Tests that the snapshot counts only effectively active ads as active.
    ///
    /// Expected: Ok with 3 total, 2 active, 1 premium, 2 users, 1 scammer
    #[tokio::test]
    async fn collects_counts_from_store() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_marketplace_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        AdFactory::new(db).build().await?;
        AdFactory::new(db).premium(true).build().await?;
        AdFactory::new(db)
            .premium(true)
            .expires_at(Utc::now() - Duration::hours(1))
            .build()
            .await?;
        UserFactory::new(db).build().await?;
        UserFactory::new(db).scammer(true).build().await?;

        let snapshot = collect_snapshot(db).await.unwrap();

        assert_eq!(
            snapshot,
            BusinessSnapshot {
                ads_total: 3,
                ads_active: 2,
                ads_premium: 1,
                users_total: 2,
                users_scammers: 1,
            }
        );

        Ok(())
    }
}
