//! `GET /api/voices/<filename>` (spec.md §4.10): serves this instance's local
//! scratch copy of a synthesized voice file. Path-traversal hardened; only
//! `.wav`/`.mp3` are servable.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::state::AppState;

pub async fn serve(State(state): State<AppState>, Path(filename): Path<String>) -> impl IntoResponse {
    if !is_safe_filename(&filename) {
        return (StatusCode::BAD_REQUEST, "invalid filename").into_response();
    }

    let content_type = match filename.rsplit('.').next() {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        _ => return (StatusCode::BAD_REQUEST, "unsupported file type").into_response(),
    };

    let path = format!("{}/{filename}", state.config.voice_scratch_dir.trim_end_matches('/'));
    let bytes = match tokio::fs::read(&path).await {
        Ok(b) if !b.is_empty() => b,
        Ok(_) => return (StatusCode::NOT_FOUND, "voice file is empty").into_response(),
        Err(_) => return (StatusCode::NOT_FOUND, "voice file not found").into_response(),
    };

    let len = bytes.len();
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_LENGTH, len.to_string()),
            (header::CACHE_CONTROL, "public, max-age=1800".to_string()),
        ],
        bytes,
    )
        .into_response()
}

/// Only a bare `name.wav`/`name.mp3` — no `..`, no path separators.
fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.contains("..")
        && !name.contains('/')
        && !name.contains('\\')
        && (name.ends_with(".wav") || name.ends_with(".mp3"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_traversal() {
        assert!(!is_safe_filename("../../etc/passwd"));
        assert!(!is_safe_filename("a/b.mp3"));
    }

    #[test]
    fn rejects_unsupported_extension() {
        assert!(!is_safe_filename("clip.exe"));
    }

    #[test]
    fn accepts_plain_filename() {
        assert!(is_safe_filename("9f3b2e.mp3"));
    }
}
