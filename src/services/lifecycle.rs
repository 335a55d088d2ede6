//! Resource Lifecycle (C12, spec §4.12). The only process-wide state besides
//! the DB pool is the scratch voice directory (spec §9 "Global state").

use std::time::{Duration, SystemTime};

const MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// Evicts `.wav`/`.mp3` files older than `max_age` from `dir`. Best-effort:
/// a file vanishing mid-sweep (concurrent delete) is not an error (spec §5).
pub async fn evict_stale_voice_files(dir: &str, max_age: Duration) -> std::io::Result<usize> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let now = SystemTime::now();
    let mut evicted = 0;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !matches!(ext, "wav" | "mp3") {
            continue;
        }
        let Ok(metadata) = entry.metadata().await else { continue };
        let Ok(modified) = metadata.modified() else { continue };
        let Ok(age) = now.duration_since(modified) else { continue };
        if age > max_age {
            if tokio::fs::remove_file(&path).await.is_ok() {
                evicted += 1;
            }
        }
    }
    Ok(evicted)
}

pub async fn evict_default(dir: &str) -> std::io::Result<usize> {
    evict_stale_voice_files(dir, MAX_AGE).await
}
