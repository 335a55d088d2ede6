//! TTS contract client (spec §4.6, §6 "TTS contract").

use base64::Engine;
use serde::{Deserialize, Serialize};

const DEFAULT_VOICE: &str = "cmn-TW-Wavenet-A";

#[derive(Serialize)]
struct SynthesizeInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct VoiceSelector<'a> {
    #[serde(rename = "languageCode")]
    language_code: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct AudioConfig {
    #[serde(rename = "audioEncoding")]
    audio_encoding: &'static str,
    #[serde(rename = "speakingRate")]
    speaking_rate: f32,
}

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    input: SynthesizeInput<'a>,
    voice: VoiceSelector<'a>,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig,
}

#[derive(Deserialize)]
struct SynthesizeResponse {
    #[serde(rename = "audioContent")]
    audio_content: String,
}

pub struct SynthesisOutput {
    pub audio_bytes: Vec<u8>,
}

/// `synthesize` (spec §4.6). `rate` is clamped to the provider's supported
/// `[0.5, 2.0]` range before the call.
pub async fn synthesize(
    http: &reqwest::Client,
    api_key: &str,
    endpoint: &str,
    text: &str,
    rate: f32,
) -> Result<SynthesisOutput, reqwest::Error> {
    let rate = rate.clamp(0.5, 2.0);
    let request = SynthesizeRequest {
        input: SynthesizeInput { text },
        voice: VoiceSelector {
            language_code: "cmn-TW",
            name: DEFAULT_VOICE,
        },
        audio_config: AudioConfig {
            audio_encoding: "MP3",
            speaking_rate: rate,
        },
    };

    let response: SynthesizeResponse = http
        .post(endpoint)
        .query(&[("key", api_key)])
        .json(&request)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let audio_bytes = base64::engine::general_purpose::STANDARD
        .decode(response.audio_content)
        .unwrap_or_default();

    Ok(SynthesisOutput { audio_bytes })
}

/// Used when the provider gave no duration: ~0.5s/CJK char, 1s floor (spec §4.6).
pub fn estimate_duration_ms(text: &str) -> u64 {
    let cjk_chars = text.chars().filter(|c| crate::services::normalizer::contains_cjk_char(*c)).count();
    let estimate = (cjk_chars as u64) * 500;
    estimate.max(1000)
}
