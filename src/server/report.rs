//! Error capture for failures worth alerting on.
//!
//! Handlers never wait on reporting: [`dispatch`] hands the report to a spawned task, so a
//! slow or failing notification channel cannot affect the response.

use std::{fmt::Write, sync::Arc};

use async_trait::async_trait;
use serde_json::json;

/// Structured description of a captured failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    /// Handler the failure happened in.
    pub handler: String,
    /// Failure class (`database`, `external_api`, ...).
    pub class: String,
    pub message: String,
    /// Extra context such as entity ids or upstream status.
    pub tags: Vec<(String, String)>,
}

#[async_trait]
pub trait ErrorReporter: Send + Sync {
    /// Delivers a report. Implementations handle their own delivery failures.
    async fn report(&self, report: ErrorReport);
}

/// Forwards `report` to `reporter` on a background task.
pub fn dispatch(reporter: Arc<dyn ErrorReporter>, report: ErrorReport) {
    tokio::spawn(async move {
        reporter.report(report).await;
    });
}

/// Reporter that only writes the failure to the log.
pub struct LogReporter;

#[async_trait]
impl ErrorReporter for LogReporter {
    async fn report(&self, report: ErrorReport) {
        tracing::error!(
            handler = %report.handler,
            class = %report.class,
            tags = ?report.tags,
            "Application error: {}",
            report.message
        );
    }
}

/// Reporter that logs the failure and posts it to a Telegram chat.
pub struct TelegramReporter {
    http_client: reqwest::Client,
    send_message_url: String,
    chat_id: String,
}

impl TelegramReporter {
    /// Creates a reporter posting through the Bot API `sendMessage` method.
    ///
    /// # Arguments
    /// - `http_client` - Shared HTTP client
    /// - `api_url` - Bot API base URL without trailing slash
    /// - `bot_token` - Bot token
    /// - `chat_id` - Chat receiving notifications
    pub fn new(http_client: reqwest::Client, api_url: &str, bot_token: &str, chat_id: String) -> Self {
        Self {
            http_client,
            send_message_url: format!("{}/bot{}/sendMessage", api_url, bot_token),
            chat_id,
        }
    }
}

#[async_trait]
impl ErrorReporter for TelegramReporter {
    async fn report(&self, report: ErrorReport) {
        LogReporter.report(report.clone()).await;

        let body = json!({
            "chat_id": self.chat_id,
            "text": format_report(&report),
            "parse_mode": "MarkdownV2",
            "disable_web_page_preview": true,
        });

        match self
            .http_client
            .post(&self.send_message_url)
            .json(&body)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                tracing::warn!(
                    "Failed to send error notification: Telegram returned {}",
                    response.status()
                );
            }
            Err(e) => tracing::warn!("Failed to send error notification: {}", e),
        }
    }
}

/// Renders a report as a MarkdownV2 message.
fn format_report(report: &ErrorReport) -> String {
    let mut text = String::from("🚨 *Application error*\n\n");
    let _ = writeln!(text, "*Handler:* {}", escape_markdown(&report.handler));
    let _ = writeln!(text, "*Class:* {}", escape_markdown(&report.class));
    let _ = writeln!(text, "*Error:* `{}`", escape_markdown(&report.message));

    if !report.tags.is_empty() {
        text.push_str("\n*Context:*\n");
        for (key, value) in &report.tags {
            let _ = writeln!(text, "• {}: `{}`", escape_markdown(key), escape_markdown(value));
        }
    }

    text
}

/// Escapes every character MarkdownV2 reserves.
fn escape_markdown(value: &str) -> String {
    const RESERVED: &[char] = &[
        '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}',
        '.', '!',
    ];

    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Reporter collecting every report it receives.
    #[derive(Default)]
    pub struct RecordingReporter {
        pub reports: Mutex<Vec<ErrorReport>>,
    }

    #[async_trait]
    impl ErrorReporter for RecordingReporter {
        async fn report(&self, report: ErrorReport) {
            self.reports.lock().unwrap().push(report);
        }
    }
}
