//! Bilingual Normalizer (C3, spec §4.3). Pure value transformation: no DB
//! access, no mutation of caller input — "parallel bilingual representations,
//! not in-place translation" (spec §9).

use serde::Deserialize;
use serde_json::Value;

/// `{ original, translated, quantity, price, menu_item_id? }` — every item
/// carries both its Chinese original and user-language translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalItem {
    pub original: String,
    pub translated: String,
    pub quantity: i32,
    pub price: i64,
    pub menu_item_id: Option<String>,
}

/// True if `c` falls in one of the CJK Unicode ranges named in spec §4.3.
pub fn contains_cjk_char(c: char) -> bool {
    let cp = c as u32;
    (0x3400..=0x4DBF).contains(&cp)
        || (0x4E00..=0x9FFF).contains(&cp)
        || (0x3040..=0x30FF).contains(&cp)
        || (0xAC00..=0xD7AF).contains(&cp)
}

pub fn contains_cjk(s: &str) -> bool {
    s.chars().any(contains_cjk_char)
}

/// Raw shape a caller may submit for one cart item; every field is optional
/// because the two submission dialects (spec §4.8) disagree on names.
#[derive(Debug, Default, Deserialize)]
pub struct RawCartItem {
    pub name: Option<RawName>,
    pub ocr_name: Option<String>,
    pub original_name: Option<String>,
    pub translated_name: Option<String>,
    pub item_name: Option<String>,
    #[serde(rename = "name_str")]
    pub bare_name: Option<String>,
    pub quantity: Option<i64>,
    pub qty: Option<i64>,
    pub price: Option<i64>,
    pub price_small: Option<i64>,
    pub price_unit: Option<i64>,
    pub menu_item_id: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawName {
    Pair { original: String, translated: String },
    Bare(String),
}

/// One normalised item, or the reason it was rejected (spec §4.3 rule 4, §8
/// "Boundary behaviours").
pub type NormalizeOutcome = Result<CanonicalItem, &'static str>;

/// Applies rules 1-4 of spec §4.3 to a single raw item. Never mutates `raw`.
pub fn normalize_item(raw: &RawCartItem) -> NormalizeOutcome {
    let (presumed_zh, presumed_translated) = detect_shape(raw);
    let (original, translated) = safe_build_localised_name(&presumed_zh, &presumed_translated);

    let quantity = raw.quantity.or(raw.qty).unwrap_or(0);
    let price = raw
        .price
        .or(raw.price_small)
        .or(raw.price_unit)
        .unwrap_or(-1);

    if quantity <= 0 || price < 0 {
        return Err("quantity and price must be positive");
    }

    let menu_item_id = raw.menu_item_id.as_ref().and_then(value_to_id_string);

    Ok(CanonicalItem {
        original,
        translated,
        quantity: quantity as i32,
        price,
        menu_item_id,
    })
}

pub fn normalize_cart(raw_items: &[RawCartItem]) -> Vec<CanonicalItem> {
    raw_items.iter().filter_map(|r| normalize_item(r).ok()).collect()
}

/// Rule 1, "Shape detection": find the presumed-Chinese and presumed-translated
/// fields in priority order, regardless of which submission dialect supplied them.
fn detect_shape(raw: &RawCartItem) -> (String, String) {
    if let Some(name) = &raw.name {
        return match name {
            RawName::Pair { original, translated } => (original.clone(), translated.clone()),
            RawName::Bare(s) => (s.clone(), s.clone()),
        };
    }
    let presumed_zh = raw
        .ocr_name
        .clone()
        .or_else(|| raw.original_name.clone())
        .or_else(|| raw.item_name.clone())
        .or_else(|| raw.bare_name.clone())
        .unwrap_or_default();
    let presumed_translated = raw.translated_name.clone().unwrap_or_default();
    (presumed_zh, presumed_translated)
}

/// Rules 2-3: CJK-aware assignment plus the field-reversal guard. Idempotent
/// (P4) — feeding its own output back through produces the same pair, because
/// a CJK-bearing `original` and a non-CJK `translated` is already the fixed point.
pub fn safe_build_localised_name(presumed_zh: &str, presumed_translated: &str) -> (String, String) {
    let zh_has_cjk = contains_cjk(presumed_zh);
    let translated_has_cjk = contains_cjk(presumed_translated);

    let (mut original, mut translated) = if zh_has_cjk {
        let translated = if presumed_translated.is_empty() || contains_cjk(presumed_translated) {
            presumed_zh.to_string()
        } else {
            presumed_translated.to_string()
        };
        (presumed_zh.to_string(), translated)
    } else if translated_has_cjk {
        (presumed_translated.to_string(), presumed_zh.to_string())
    } else {
        (presumed_zh.to_string(), presumed_translated.to_string())
    };

    // Rule 3: field-reversal guard, applied once.
    if !contains_cjk(&original) && contains_cjk(&translated) {
        tracing::debug!(original = %original, translated = %translated, "correcting reversed cart item fields");
        std::mem::swap(&mut original, &mut translated);
    }

    (original, translated)
}

fn value_to_id_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(original: &str, translated: &str, qty: i64, price: i64) -> RawCartItem {
        RawCartItem {
            name: Some(RawName::Pair { original: original.into(), translated: translated.into() }),
            quantity: Some(qty),
            price: Some(price),
            ..Default::default()
        }
    }

    #[test]
    fn detects_cjk_ranges() {
        assert!(contains_cjk("招牌金湯酸菜"));
        assert!(contains_cjk("おすすめ"));
        assert!(contains_cjk("김치"));
        assert!(!contains_cjk("Signature Golden Soup"));
    }

    #[test]
    fn straightforward_pair_passes_through() {
        let item = normalize_item(&pair("招牌金湯酸菜", "Signature Golden Soup Pickled Cabbage", 1, 68)).unwrap();
        assert_eq!(item.original, "招牌金湯酸菜");
        assert_eq!(item.translated, "Signature Golden Soup Pickled Cabbage");
    }

    #[test]
    fn reversed_fields_are_corrected_p5() {
        // S2: original has no CJK, translated does.
        let item = normalize_item(&pair("Kimchi Pot", "泡菜鍋", 1, 120)).unwrap();
        assert_eq!(item.original, "泡菜鍋");
        assert_eq!(item.translated, "Kimchi Pot");
    }

    #[test]
    fn safe_build_is_idempotent_p4() {
        let (o1, t1) = safe_build_localised_name("Kimchi Pot", "泡菜鍋");
        let (o2, t2) = safe_build_localised_name(&o1, &t1);
        assert_eq!((o1, t1), (o2, t2));
    }

    #[test]
    fn non_cjk_pair_is_kept_as_supplied() {
        let (o, t) = safe_build_localised_name("Latte", "Caffe Latte");
        assert_eq!(o, "Latte");
        assert_eq!(t, "Caffe Latte");
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(normalize_item(&pair("茶", "Tea", 0, 30)).is_err());
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(normalize_item(&pair("茶", "Tea", 1, -1)).is_err());
    }

    #[test]
    fn alternate_field_names_are_detected() {
        let raw = RawCartItem {
            item_name: Some("白濃雞湯".into()),
            translated_name: Some("White Thick Chicken Soup".into()),
            qty: Some(2),
            price_small: Some(49),
            ..Default::default()
        };
        let item = normalize_item(&raw).unwrap();
        assert_eq!(item.original, "白濃雞湯");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, 49);
    }

    #[test]
    fn normalize_cart_drops_rejected_items_silently() {
        let items = vec![pair("茶", "Tea", 1, 30), pair("咖啡", "Coffee", 0, 40)];
        let canonical = normalize_cart(&items);
        assert_eq!(canonical.len(), 1);
    }
}
