//! Voice Synthesizer (C6, spec §4.6). Calls TTS, writes to the scratch
//! directory, uploads to object storage, returns a public HTTPS URL.

use crate::config::Config;
use crate::external::tts;
use crate::services::lifecycle;

pub struct SynthesisResult {
    pub local_path: Option<String>,
    pub duration_ms: u64,
    pub is_fallback: bool,
}

/// `synthesize(text, rate)` (spec §4.6). Evicts stale scratch files first
/// (spec §4.12), then checks memory pressure before calling the provider —
/// mirrors the teacher's "fail safe before the expensive call" shape.
pub async fn synthesize(
    http: &reqwest::Client,
    config: &Config,
    text: &str,
    rate: f32,
) -> SynthesisResult {
    let _ = lifecycle::evict_default(&config.voice_scratch_dir).await;

    if memory_pressure_exceeds_budget() {
        tracing::warn!("memory budget exceeded, taking text-only fallback");
        return fallback(text);
    }

    match tts::synthesize(http, &config.tts_api_key, &config.tts_endpoint, text, rate).await {
        Ok(output) if !output.audio_bytes.is_empty() => {
            let filename = format!("{}.mp3", uuid::Uuid::new_v4());
            let path = format!("{}/{filename}", config.voice_scratch_dir.trim_end_matches('/'));
            if let Err(e) = write_scratch_file(&path, &output.audio_bytes).await {
                tracing::error!(error = %e, "failed to write voice scratch file");
                return fallback(text);
            }
            SynthesisResult {
                local_path: Some(path),
                duration_ms: tts::estimate_duration_ms(text),
                is_fallback: false,
            }
        }
        Ok(_) => {
            tracing::warn!("tts provider returned empty audio, falling back to text-only");
            fallback(text)
        }
        Err(e) => {
            tracing::warn!(error = %e, "tts provider unreachable, falling back to text-only");
            fallback(text)
        }
    }
}

async fn write_scratch_file(path: &str, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await
}

fn fallback(text: &str) -> SynthesisResult {
    SynthesisResult {
        local_path: None,
        duration_ms: tts::estimate_duration_ms(text),
        is_fallback: true,
    }
}

/// True when process memory exceeds 80% of a provisioned budget (spec §4.6,
/// §5). Linux-only `/proc/self/status` read; any failure to determine usage
/// is treated as "not exceeded" so a sandboxed/non-Linux host never spuriously
/// falls back.
fn memory_pressure_exceeds_budget() -> bool {
    const BUDGET_KB: u64 = 512 * 1024;
    let Ok(status) = std::fs::read_to_string("/proc/self/status") else { return false };
    let Some(line) = status.lines().find(|l| l.starts_with("VmRSS:")) else { return false };
    let Some(kb) = line.split_whitespace().nth(1).and_then(|v| v.parse::<u64>().ok()) else {
        return false;
    };
    kb as f64 > BUDGET_KB as f64 * 0.8
}

/// `upload(local_path, order_id)` (spec §4.6). Uploads to the configured
/// bucket, makes the object public-read, returns an `https://` URL. A
/// missing bucket triggers a one-shot create; a second failure returns `None`.
pub async fn upload(
    s3: &aws_sdk_s3::Client,
    config: &Config,
    local_path: &str,
    order_id: i64,
) -> Option<String> {
    let bytes = tokio::fs::read(local_path).await.ok()?;
    let key = format!("voices/{order_id}/{}", uuid::Uuid::new_v4());

    let put = s3
        .put_object()
        .bucket(&config.gcs_bucket_name)
        .key(&key)
        .body(bytes.clone().into())
        .content_type("audio/mpeg")
        .acl(aws_sdk_s3::types::ObjectCannedAcl::PublicRead)
        .send()
        .await;

    if put.is_err() {
        tracing::warn!(bucket = %config.gcs_bucket_name, "upload failed, attempting one-shot bucket create");
        if s3.create_bucket().bucket(&config.gcs_bucket_name).send().await.is_err() {
            tracing::error!("bucket create failed, giving up on voice upload");
            return None;
        }
        if s3
            .put_object()
            .bucket(&config.gcs_bucket_name)
            .key(&key)
            .body(bytes.into())
            .content_type("audio/mpeg")
            .acl(aws_sdk_s3::types::ObjectCannedAcl::PublicRead)
            .send()
            .await
            .is_err()
        {
            return None;
        }
    }

    Some(format!(
        "{}/{}/{key}",
        config.object_storage_endpoint.trim_end_matches('/'),
        config.gcs_bucket_name
    ))
}
