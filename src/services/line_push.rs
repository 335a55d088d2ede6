//! LINE Pusher (C7, spec §4.7). Validates before any network I/O (P7).

use crate::external::line;
use crate::models::user::is_valid_line_user_id;

/// Zero network I/O when the id fails the regex (P7). `audio_url` is dropped
/// silently (not an error) when it doesn't start with `https://`.
pub async fn push(
    http: &reqwest::Client,
    channel_access_token: &str,
    line_user_id: &str,
    chinese_summary: &str,
    user_language_summary: &str,
    total_amount: i64,
    audio_url: Option<&str>,
    duration_ms: Option<u64>,
) -> Result<(), String> {
    if !is_valid_line_user_id(line_user_id) {
        tracing::warn!(line_user_id, "dropping push: malformed LINE user id");
        return Ok(());
    }

    let text = format!(
        "{user_language_summary}\n中文摘要(給店家聽)：{chinese_summary}\n總金額：{total_amount} 元"
    );

    let eligible_audio_url = audio_url.filter(|u| u.starts_with("https://")).map(str::to_string);

    line::push(http, channel_access_token, line_user_id, text, eligible_audio_url, duration_ms)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "LINE push failed");
            e.to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn drops_call_for_malformed_id_without_network() {
        // No HTTP client activity is observable here, but an empty id must
        // short-circuit to Ok before any request is attempted.
        let http = reqwest::Client::new();
        let result = push(&http, "token", "not-a-line-id", "zh", "en", 100, None, None).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn drops_call_for_guest_token() {
        let http = reqwest::Client::new();
        let result = push(&http, "token", "temp_guest_123", "zh", "en", 100, None, None).await;
        assert!(result.is_ok());
    }
}
