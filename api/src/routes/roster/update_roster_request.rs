use serde::Serialize;

/// Response payload for /chatbot/api/update-player-data.
///
/// The upstream roster service checks `success` and logs `message`; domain
/// failures keep HTTP 200 with `success: false`, matching its expectations.
#[derive(Debug, Serialize)]
pub struct UpdateRosterResponse {
    pub success: bool,
    pub message: String,
}

impl UpdateRosterResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
