//! OCRMenu / OCRMenuItem / OCRMenuTranslation — rows produced by the Menu
//! OCR Ingestor (C2) from a single uploaded photo. Immutable after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OcrMenu {
    pub id: i64,
    pub user_id: i64,
    pub store_id: Option<i64>,
    /// Store name as printed on the photo, not necessarily matching any `Store.store_name`.
    pub captured_store_name: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OcrMenuItem {
    pub id: i64,
    pub ocr_menu_id: i64,
    pub item_name: String,
    pub translated_desc: String,
    pub price_small: i64,
    pub price_big: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OcrMenuTranslation {
    pub id: i64,
    pub ocr_menu_item_id: i64,
    pub language: String,
    pub translated_name: String,
    pub translated_description: String,
}

/// A decoded temp id, per the two forms named in the glossary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempItemRef {
    /// `ocr_{ocr_menu_item_id}` — direct reference to an OCRMenuItem row.
    Direct(i64),
    /// `temp_{ocr_menu_id}_{idx}` — the `idx`-th item of an OCRMenu, 0-based.
    Indexed { ocr_menu_id: i64, idx: u32 },
}

/// Round-trips a temp identifier emitted by ingestion (§4.2) back to the
/// originating OCRMenuItem row, per the two forms named in the glossary.
pub fn parse_temp_item_id(raw: &str) -> Option<TempItemRef> {
    if let Some(rest) = raw.strip_prefix("ocr_") {
        return rest.parse().ok().map(TempItemRef::Direct);
    }
    if let Some(rest) = raw.strip_prefix("temp_") {
        let (ocr_menu_id, idx) = rest.rsplit_once('_')?;
        return Some(TempItemRef::Indexed {
            ocr_menu_id: ocr_menu_id.parse().ok()?,
            idx: idx.parse().ok()?,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ocr_prefixed_id() {
        assert_eq!(parse_temp_item_id("ocr_482"), Some(TempItemRef::Direct(482)));
    }

    #[test]
    fn parses_temp_prefixed_id_as_ocr_menu_id_and_index() {
        assert_eq!(
            parse_temp_item_id("temp_99_3"),
            Some(TempItemRef::Indexed { ocr_menu_id: 99, idx: 3 })
        );
    }

    #[test]
    fn rejects_unknown_shape() {
        assert_eq!(parse_temp_item_id("122"), None);
        assert_eq!(parse_temp_item_id("temp_abc_3"), None);
    }
}
