use serde::Serialize;
use utoipa::ToSchema;

/// Acknowledgement payload returned by game commands.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommandAck {
    /// Outcome marker, always `"ok"` for accepted commands.
    pub status: &'static str,
    /// Optional human-readable detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CommandAck {
    /// Acknowledge with a detail message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok",
            message: Some(message.into()),
        }
    }

    /// Bare acknowledgement without a message.
    pub fn ok_bare() -> Self {
        Self {
            status: "ok",
            message: None,
        }
    }
}
