//! Photo resolution service.
//!
//! Resolves an ad's stored media reference to a streamed body from the file host:
//!
//! 1. A direct path is used as is.
//! 2. A file handle is resolved to a path first; failing that, the photo is treated as absent.
//! 3. Without either reference the photo is absent and the file host is never contacted.
//!
//! A 404 from the host means the file is gone and maps to "not found"; any other failure
//! maps to an upstream error.

use std::{sync::Arc, time::Instant};

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::ad::AdRepository,
    error::{file_host::FileHostError, photo::PhotoError, AppError},
    metrics::Metrics,
    model::ad::PhotoRef,
    service::file_host::{FileHost, FileResponse},
};

/// Service resolving ad photos through the file host.
pub struct PhotoService<'a> {
    db: &'a DatabaseConnection,
    file_host: Option<Arc<dyn FileHost>>,
    metrics: &'a Metrics,
}

impl<'a> PhotoService<'a> {
    /// Creates a new PhotoService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `file_host` - File host client, `None` when no bot token is configured
    /// - `metrics` - Metrics receiving query durations
    pub fn new(
        db: &'a DatabaseConnection,
        file_host: Option<Arc<dyn FileHost>>,
        metrics: &'a Metrics,
    ) -> Self {
        Self {
            db,
            file_host,
            metrics,
        }
    }

    /// Resolves the photo of an ad and starts streaming it.
    ///
    /// # Arguments
    /// - `ad_id` - Id of the ad whose photo is requested
    ///
    /// # Returns
    /// - `Ok(FileResponse)` - Upstream response with passthrough headers and streaming body
    /// - `Err(AppError::PhotoErr)` - Ad or photo absent (404) or file host failure (502)
    /// - `Err(AppError::DbErr)` - Database error while loading the ad
    pub async fn resolve(&self, ad_id: i32) -> Result<FileResponse, AppError> {
        let started = Instant::now();
        let ad = AdRepository::new(self.db).find_by_id(ad_id, Utc::now()).await;
        self.metrics.observe_query("select", started.elapsed());

        let Some(ad) = ad? else {
            return Err(PhotoError::AdNotFound(ad_id).into());
        };

        if ad.photo == PhotoRef::None {
            tracing::debug!("Ad {} has no photo reference", ad_id);
            return Err(PhotoError::NoPhoto(ad_id).into());
        }

        let Some(file_host) = &self.file_host else {
            tracing::warn!("Photo requested for ad {} but no file host is configured", ad_id);
            return Err(PhotoError::NotConfigured.into());
        };

        let path = match ad.photo {
            PhotoRef::Path(path) => path,
            PhotoRef::Handle(handle) => match file_host.resolve_handle(&handle).await {
                Ok(path) => path,
                Err(e) => {
                    tracing::info!("Could not resolve photo handle of ad {}: {}", ad_id, e);
                    return Err(PhotoError::HandleUnresolved {
                        ad_id,
                        reason: e.to_string(),
                    }
                    .into());
                }
            },
            PhotoRef::None => return Err(PhotoError::NoPhoto(ad_id).into()),
        };

        file_host.fetch(&path).await.map_err(|e| {
            let err = match e {
                FileHostError::Status(404) => {
                    tracing::info!("Photo of ad {} is gone upstream: {}", ad_id, path);
                    PhotoError::UpstreamNotFound { path }
                }
                FileHostError::Status(status) => PhotoError::Upstream {
                    status: Some(status),
                    path,
                    reason: e.to_string(),
                },
                other => PhotoError::Upstream {
                    status: None,
                    path,
                    reason: other.to_string(),
                },
            };
            AppError::from(err)
        })
    }
}
