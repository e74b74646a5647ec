use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Single-key error body returned by every failing endpoint that carries a message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct HealthDto {
    pub status: String,
}
