//! Telegram mini-app init data authentication.
//!
//! Callers send the raw init data string in `Authorization: tma <init-data>`. The data is
//! trusted when its `hash` field equals the HMAC-SHA256 of the data-check string, keyed by
//! `HMAC-SHA256("WebAppData", bot_token)`.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::server::{error::AppError, state::AppState};

type HmacSha256 = Hmac<Sha256>;

/// Authorization scheme carrying mini-app init data.
const SCHEME: &str = "tma ";

/// Key of the secret derivation step, fixed by the Bot API.
const SECRET_KEY: &[u8] = b"WebAppData";

/// Validates init data signed for one bot token.
pub struct InitDataValidator {
    secret: Vec<u8>,
}

impl InitDataValidator {
    /// Derives the validation secret from the bot token.
    ///
    /// # Arguments
    /// - `bot_token` - Token of the bot the mini-app belongs to
    ///
    /// # Returns
    /// - `Ok(InitDataValidator)` - Validator ready for use
    /// - `Err(AppError::InternalError)` - HMAC key rejected
    pub fn new(bot_token: &str) -> Result<Self, AppError> {
        let mut mac = new_mac(SECRET_KEY)?;
        mac.update(bot_token.as_bytes());

        Ok(Self {
            secret: mac.finalize().into_bytes().to_vec(),
        })
    }

    /// Checks the signature of a raw init data string.
    ///
    /// # Arguments
    /// - `init_data` - URL-encoded init data as sent by the mini-app
    ///
    /// # Returns
    /// - `Ok(())` - Signature matches
    /// - `Err(AppError::Unauthorized)` - Hash missing, malformed or not matching
    pub fn validate(&self, init_data: &str) -> Result<(), AppError> {
        let mut hash = None;
        let mut fields = Vec::new();

        for (key, value) in url::form_urlencoded::parse(init_data.as_bytes()) {
            if key == "hash" {
                hash = Some(value.into_owned());
            } else {
                fields.push(format!("{}={}", key, value));
            }
        }

        let Some(hash) = hash else {
            return Err(AppError::Unauthorized("init data hash is missing".to_string()));
        };
        let expected = hex::decode(&hash)
            .map_err(|_| AppError::Unauthorized("init data hash is malformed".to_string()))?;

        fields.sort();
        let data_check_string = fields.join("\n");

        let mut mac = new_mac(&self.secret)?;
        mac.update(data_check_string.as_bytes());
        mac.verify_slice(&expected)
            .map_err(|_| AppError::Unauthorized("invalid init data".to_string()))
    }
}

fn new_mac(key: &[u8]) -> Result<HmacSha256, AppError> {
    HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::InternalError(format!("invalid HMAC key: {}", e)))
}

/// Middleware rejecting `/api` requests without valid init data.
///
/// Passes every request through when no validator is configured.
///
/// # Returns
/// - `Ok(Response)` - Response of the inner handler
/// - `Err(AppError::Unauthorized)` - Header missing or signature invalid (401)
pub async fn require_init_data(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(validator) = state.auth.as_ref().map(Arc::clone) else {
        return Ok(next.run(req).await);
    };

    let init_data = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(SCHEME))
        .ok_or_else(|| AppError::Unauthorized("authorization required".to_string()))?;

    if let Err(e) = validator.validate(init_data) {
        tracing::debug!("Rejected init data on {}: {}", req.uri().path(), e);
        return Err(e);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Signs `fields` the way the mini-app platform does and returns the init data string.
    pub fn sign_init_data(bot_token: &str, fields: &[(&str, &str)]) -> String {
        let mut secret_mac = HmacSha256::new_from_slice(SECRET_KEY).unwrap();
        secret_mac.update(bot_token.as_bytes());
        let secret = secret_mac.finalize().into_bytes();

        let mut pairs: Vec<String> = fields
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        pairs.sort();

        let mut mac = HmacSha256::new_from_slice(&secret).unwrap();
        mac.update(pairs.join("\n").as_bytes());
        let hash = hex::encode(mac.finalize().into_bytes());

        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in fields {
            serializer.append_pair(key, value);
        }
        serializer.append_pair("hash", &hash);
        serializer.finish()
    }
}
