//! Vision OCR contract client (spec §4.2 step 3, §6 "Vision model contract").
//! Single-shot structured-JSON request; we never parse free text.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const TIMEOUT: std::time::Duration = std::time::Duration::from_secs(240);

#[derive(Debug, Deserialize)]
pub struct VisionMenuItem {
    pub original_name: Option<String>,
    pub translated_name: Option<String>,
    #[serde(default)]
    pub price: i64,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VisionStoreInfo {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VisionResponse {
    pub success: bool,
    #[serde(default)]
    pub menu_items: Vec<VisionMenuItem>,
    pub store_info: Option<VisionStoreInfo>,
    pub processing_notes: Option<String>,
}

impl VisionMenuItem {
    /// Nullable string fields are coerced to empty strings at the boundary
    /// so downstream rendering never sees `None` (spec §4.2 step 5).
    pub fn original_name_or_empty(&self) -> &str {
        self.original_name.as_deref().unwrap_or("")
    }

    pub fn translated_name_or_empty(&self) -> &str {
        self.translated_name.as_deref().unwrap_or("")
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[derive(Serialize)]
struct VisionRequest<'a> {
    image_base64: &'a str,
    target_language: &'a str,
    prompt: &'a str,
}

const PROMPT: &str = r#"You are reading a restaurant menu photo. Return a single JSON object, no code fences, matching:
{"success": bool, "menu_items": [{"original_name": str, "translated_name": str, "price": int, "description": str|null, "category": str|null}], "store_info": {"name": str|null, "address": str|null, "phone": str|null}, "processing_notes": str|null}.
original_name is the Chinese text exactly as printed, never translated. translated_name is the target language translation. price is an integer, 0 if unreadable. Never guess missing store fields; leave them null. If the image is illegible set success to false and explain why in processing_notes."#;

/// Invokes the external vision model with a 240s timeout; a timeout becomes
/// `AppError::ocr_timeout()` with the literal fallback message (spec §4.2, S4).
pub async fn recognise_menu(
    http: &reqwest::Client,
    api_key: &str,
    endpoint: &str,
    image_bytes: &[u8],
    target_language: &str,
) -> Result<VisionResponse, AppError> {
    let image_base64 = base64::engine::general_purpose::STANDARD.encode(image_bytes);
    let request = VisionRequest {
        image_base64: &image_base64,
        target_language,
        prompt: PROMPT,
    };

    let call = http
        .post(endpoint)
        .bearer_auth(api_key)
        .json(&request)
        .send();

    let response = match tokio::time::timeout(TIMEOUT, call).await {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => return Err(AppError::with_message(
            crate::error::ErrorCode::OcrBackendError,
            format!("vision request failed: {e}"),
        )),
        Err(_) => return Err(AppError::ocr_timeout()),
    };

    if !response.status().is_success() {
        return Err(AppError::with_message(
            crate::error::ErrorCode::OcrBackendError,
            format!("vision backend returned {}", response.status()),
        ));
    }

    let parsed: VisionResponse = response.json().await.map_err(|e| {
        AppError::with_message(crate::error::ErrorCode::OcrJsonInvalid, format!("vision response not valid JSON: {e}"))
    })?;

    if !parsed.success || parsed.menu_items.is_empty() {
        return Err(AppError::ocr_unrecognised(
            parsed
                .processing_notes
                .clone()
                .unwrap_or_else(|| "menu not recognised".to_string()),
        ));
    }

    Ok(parsed)
}
