//! LINE Messaging push client (spec §4.7, §6 "HTTP API").

use serde::Serialize;

const PUSH_ENDPOINT: &str = "https://api.line.me/v2/bot/message/push";

#[derive(Serialize)]
#[serde(tag = "type")]
enum Message {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "audio")]
    Audio {
        #[serde(rename = "originalContentUrl")]
        original_content_url: String,
        duration: u64,
    },
}

#[derive(Serialize)]
struct PushRequest {
    to: String,
    messages: Vec<Message>,
}

/// Sends text + optional audio. The caller (C7) is responsible for the id
/// format check and the `https://` check on `audio_url` (P7); this function
/// performs no validation and always issues the HTTP call it's given.
pub async fn push(
    http: &reqwest::Client,
    channel_access_token: &str,
    line_user_id: &str,
    text: String,
    audio_url: Option<String>,
    duration_ms: Option<u64>,
) -> Result<(), reqwest::Error> {
    let mut messages = vec![Message::Text { text }];
    if let Some(url) = audio_url {
        messages.push(Message::Audio {
            original_content_url: url,
            duration: duration_ms.unwrap_or(1000),
        });
    }

    let request = PushRequest { to: line_user_id.to_string(), messages };

    http.post(PUSH_ENDPOINT)
        .bearer_auth(channel_access_token)
        .json(&request)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}
