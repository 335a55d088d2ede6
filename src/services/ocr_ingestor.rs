//! Menu OCR Ingestor (C2, spec §4.2). Turns a menu photograph into
//! structured, translated menu rows.

use image::imageops::FilterType;
use serde::Serialize;
use sqlx::PgPool;

use crate::db::ocr as ocr_db;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::external::vision;
use crate::models::ocr::OcrMenuItem;

const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
const MAX_EDGE_PX: u32 = 1024;
const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Serialize)]
pub struct FullModeItem {
    pub temp_id: String,
    pub original_name: String,
    pub translated_name: String,
    pub price_small: i64,
    pub price_big: i64,
    pub processing_id: i64,
}

#[derive(Debug, Serialize)]
pub struct SimpleModeItem {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum IngestResult {
    Full { items: Vec<FullModeItem> },
    Simple { items: Vec<SimpleModeItem> },
}

/// Step 1 of spec §4.2: downscale proportionally with Lanczos if the longer
/// edge exceeds 1024px, then re-encode as JPEG q85. Rejects anything over 10MB
/// before doing any decode work.
pub fn preprocess_image(bytes: &[u8]) -> AppResult<Vec<u8>> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::invalid_request(format!(
            "image too large: {} bytes (max {MAX_IMAGE_BYTES})",
            bytes.len()
        )));
    }

    let img = image::load_from_memory(bytes)
        .map_err(|e| AppError::with_message(ErrorCode::UnsupportedImageFormat, format!("unreadable image: {e}")))?;

    let (w, h) = (img.width(), img.height());
    let resized = if w.max(h) > MAX_EDGE_PX {
        let (new_w, new_h) = if w >= h {
            (MAX_EDGE_PX, (h as f64 * MAX_EDGE_PX as f64 / w as f64) as u32)
        } else {
            ((w as f64 * MAX_EDGE_PX as f64 / h as f64) as u32, MAX_EDGE_PX)
        };
        img.resize(new_w.max(1), new_h.max(1), FilterType::Lanczos3)
    } else {
        img
    };

    let mut buf = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buf);
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
    resized
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| AppError::internal(format!("jpeg re-encode failed: {e}")))?;
    Ok(buf)
}

/// Steps 3-7 of spec §4.2, given an already-preprocessed image.
pub async fn ingest(
    pool: &PgPool,
    http: &reqwest::Client,
    vision_api_key: &str,
    vision_endpoint: &str,
    image_bytes: &[u8],
    user_id: i64,
    store_id: Option<i64>,
    target_language: &str,
    simple_mode: bool,
) -> AppResult<IngestResult> {
    let recognised = vision::recognise_menu(http, vision_api_key, vision_endpoint, image_bytes, target_language).await?;

    let captured_store_name = recognised.store_info.as_ref().and_then(|s| s.name.clone());

    let new_items: Vec<ocr_db::NewOcrMenuItem> = recognised
        .menu_items
        .iter()
        .map(|item| ocr_db::NewOcrMenuItem {
            item_name: item.original_name_or_empty(),
            translated_desc: item.translated_name_or_empty(),
            price_small: item.price,
            price_big: item.price,
        })
        .collect();

    let (menu, rows) = ocr_db::insert_menu_with_items(
        pool,
        user_id,
        store_id,
        captured_store_name.as_deref(),
        &new_items,
    )
    .await
    .map_err(AppError::from)?;

    Ok(if simple_mode {
        IngestResult::Simple { items: simple_items(menu.id, &rows) }
    } else {
        IngestResult::Full { items: full_items(menu.id, &rows) }
    })
}

fn full_items(ocr_menu_id: i64, rows: &[OcrMenuItem]) -> Vec<FullModeItem> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| FullModeItem {
            temp_id: format!("temp_{ocr_menu_id}_{idx}"),
            original_name: row.item_name.clone(),
            translated_name: row.translated_desc.clone(),
            price_small: row.price_small,
            price_big: row.price_big,
            processing_id: ocr_menu_id,
        })
        .collect()
}

/// Simple-mode ids use the glossary's `ocr_{ocr_menu_item_id}` form (a direct
/// row reference) rather than the `{ocr_menu_id}_{index}` shape sketched in
/// §4.2's prose, so that `parse_temp_item_id` round-trips unambiguously.
fn simple_items(_ocr_menu_id: i64, rows: &[OcrMenuItem]) -> Vec<SimpleModeItem> {
    rows.iter()
        .map(|row| SimpleModeItem { id: format!("ocr_{}", row.id), name: row.item_name.clone() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_image_is_rejected_before_decode() {
        let bytes = vec![0u8; MAX_IMAGE_BYTES + 1];
        let err = preprocess_image(&bytes).unwrap_err();
        assert_eq!(err.code as u16, ErrorCode::InvalidRequest as u16);
    }
}
