//! Terminal bookkeeping shared by every handler.
//!
//! Each handler starts an [`Observation`] and finishes it with its result. Finishing
//! records `api_requests_total` and `api_response_time_seconds` under the final status,
//! counts classified failures in `errors_total`, and forwards server-side failures to the
//! error reporter without waiting on it.

use std::time::Instant;

use axum::response::{IntoResponse, Response};

use crate::server::{
    error::AppError,
    report::{dispatch, ErrorReport},
    state::AppState,
};

pub struct Observation<'a> {
    state: &'a AppState,
    endpoint: &'static str,
    started: Instant,
}

impl<'a> Observation<'a> {
    /// Starts timing a request to `endpoint`.
    pub fn start(state: &'a AppState, endpoint: &'static str) -> Self {
        Self {
            state,
            endpoint,
            started: Instant::now(),
        }
    }

    /// Converts the handler result into a response and records its outcome.
    pub fn finish<T: IntoResponse>(self, result: Result<T, AppError>) -> Response {
        self.finish_with_tags(result, Vec::new())
    }

    /// Like [`finish`](Self::finish), attaching `tags` to any error report.
    ///
    /// # Arguments
    /// - `result` - Handler result
    /// - `tags` - Request context, such as the entity id, sent with reports
    ///
    /// # Returns
    /// - `Response` - Success body or the error's own response mapping
    pub fn finish_with_tags<T: IntoResponse>(
        self,
        result: Result<T, AppError>,
        tags: Vec<(String, String)>,
    ) -> Response {
        let response = match result {
            Ok(body) => body.into_response(),
            Err(err) => {
                self.capture(&err, tags);
                err.into_response()
            }
        };

        self.state.metrics.record_request(
            self.endpoint,
            response.status().as_u16(),
            self.started.elapsed(),
        );

        response
    }

    fn capture(&self, err: &AppError, mut tags: Vec<(String, String)>) {
        let class = err.class();
        if let Some(class) = class {
            self.state.metrics.record_error(class, self.endpoint);
        }

        if !err.status().is_server_error() {
            tracing::debug!("{} returned {}: {}", self.endpoint, err.status(), err);
            return;
        }

        tags.extend(err.tags());
        dispatch(
            self.state.reporter.clone(),
            ErrorReport {
                handler: self.endpoint.to_string(),
                class: class.unwrap_or("internal").to_string(),
                message: err.to_string(),
                tags,
            },
        );
    }
}
