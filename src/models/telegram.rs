use serde::{Deserialize, Serialize};

/// Тело запроса Bot API `sendMessage`
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub chat_id: String,
    pub text: String,
}
