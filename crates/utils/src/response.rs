use serde::Serialize;
use ts_rs::TS;

/// `{message}` body used for every error response.
#[derive(Debug, Clone, Serialize, TS)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{ok:true}` body returned by deletes and logout.
#[derive(Debug, Clone, Serialize, TS)]
pub struct OkBody {
    pub ok: bool,
}

impl OkBody {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
