//! External file host holding ad media.
//!
//! Media is stored on the Telegram Bot API file host. A stored reference is either a
//! relative file path, fetched directly, or an opaque file id that `getFile` resolves to a
//! path first.

use async_trait::async_trait;
use axum::body::Body;
use serde::Deserialize;

use crate::server::error::file_host::FileHostError;

/// Successful file host response, with the body left unread.
#[derive(Debug)]
pub struct FileResponse {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub body: Body,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileHost: Send + Sync {
    /// Resolves an opaque file handle to a path on the host.
    ///
    /// # Returns
    /// - `Ok(String)` - Relative file path
    /// - `Err(FileHostError)` - Transport failure, non-success status or no path returned
    async fn resolve_handle(&self, handle: &str) -> Result<String, FileHostError>;

    /// Starts downloading the file at `path`.
    ///
    /// # Returns
    /// - `Ok(FileResponse)` - 2xx response, body still streaming
    /// - `Err(FileHostError::Status)` - Host answered with a non-success status
    /// - `Err(FileHostError::Transport)` - No response received
    async fn fetch(&self, path: &str) -> Result<FileResponse, FileHostError>;
}

#[derive(Deserialize)]
struct GetFileResponse {
    ok: bool,
    result: Option<GetFileResult>,
}

#[derive(Deserialize)]
struct GetFileResult {
    file_path: Option<String>,
}

/// Telegram Bot API implementation of [`FileHost`].
pub struct TelegramFileHost {
    http_client: reqwest::Client,
    api_url: String,
    bot_token: String,
}

impl TelegramFileHost {
    /// Creates a file host client.
    ///
    /// # Arguments
    /// - `http_client` - Shared client, configured with the request timeout
    /// - `api_url` - Bot API base URL without trailing slash
    /// - `bot_token` - Bot token owning the files
    pub fn new(http_client: reqwest::Client, api_url: String, bot_token: String) -> Self {
        Self {
            http_client,
            api_url,
            bot_token,
        }
    }

    fn file_url(&self, path: &str) -> String {
        format!("{}/file/bot{}/{}", self.api_url, self.bot_token, path)
    }
}

#[async_trait]
impl FileHost for TelegramFileHost {
    async fn resolve_handle(&self, handle: &str) -> Result<String, FileHostError> {
        let url = format!("{}/bot{}/getFile", self.api_url, self.bot_token);
        let response = self
            .http_client
            .get(url)
            .query(&[("file_id", handle)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FileHostError::Status(response.status().as_u16()));
        }

        let payload: GetFileResponse = response.json().await?;
        if !payload.ok {
            return Err(FileHostError::MissingPath);
        }

        payload
            .result
            .and_then(|result| result.file_path)
            .filter(|path| !path.is_empty())
            .ok_or(FileHostError::MissingPath)
    }

    async fn fetch(&self, path: &str) -> Result<FileResponse, FileHostError> {
        let response = self.http_client.get(self.file_url(path)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FileHostError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let content_length = response.content_length();

        Ok(FileResponse {
            content_type,
            content_length,
            body: Body::from_stream(response.bytes_stream()),
        })
    }
}
