use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a `chat.postMessage` call.
#[derive(Debug, Serialize)]
pub struct PostMessageRequest<'a> {
    pub channel: &'a str,
    pub blocks: &'a [Value],
    /// Fallback text for notifications; Slack derives one from blocks when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
}

/// Response envelope of `chat.postMessage`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    pub ok: bool,
    #[serde(default)]
    pub channel: Option<String>,
    /// Message timestamp; doubles as the message id within the channel.
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub warning: Option<String>,
}
