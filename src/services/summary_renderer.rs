//! Summary Renderer (C5, spec §4.5). Produces two independently rendered
//! strings plus the Mandarin voice text, via the "deep-copy rule": one base
//! view, two owned copies, never a shared mutable reference between them
//! (spec §9 "Parallel bilingual representations").

use crate::models::language;
use crate::services::normalizer::CanonicalItem;

const FALLBACK_SUMMARY: &str = "點餐摘要";
const DRINK_MARKERS: &[&str] = &["茶", "咖啡", "飲料", "果汁", "奶茶", "汽水", "可樂", "啤酒", "酒"];

#[derive(Debug, Clone)]
struct ViewItem {
    name: String,
    quantity: i32,
    price: i64,
}

#[derive(Debug, Clone)]
struct View {
    store_name: String,
    items: Vec<ViewItem>,
    total: i64,
}

pub struct RenderedSummary {
    pub chinese_summary: String,
    pub user_language_summary: String,
    pub voice_text: String,
}

/// `translate_item` abstracts over C11 so this module stays synchronous-free
/// of any particular translation backend; callers pass a closure bound to
/// the real facade (or an identity closure in tests).
pub async fn render<F, Fut>(
    store_name_zh: &str,
    cart: &[CanonicalItem],
    user_language: &str,
    translate: F,
) -> RenderedSummary
where
    F: Fn(String) -> Fut,
    Fut: std::future::Future<Output = String>,
{
    let total: i64 = cart.iter().map(|i| i.price * i.quantity as i64).sum();

    let base = View {
        store_name: store_name_zh.to_string(),
        items: cart
            .iter()
            .map(|i| ViewItem { name: i.original.clone(), quantity: i.quantity, price: i.price })
            .collect(),
        total,
    };

    // Two independent deep copies — translating `display_view` must never
    // touch `native_view` (spec §4.5 step 2).
    let native_view = base.clone();
    let mut display_view = base.clone();

    let is_chinese = language::is_chinese(user_language);
    if !is_chinese {
        display_view.store_name = translate(display_view.store_name).await;
        for item in &mut display_view.items {
            item.name = translate(std::mem::take(&mut item.name)).await;
        }
    }

    let chinese_summary = render_item_list(&native_view, None);
    let user_language_summary = if is_chinese {
        chinese_summary.clone()
    } else {
        render_item_list(&display_view, Some("Order: "))
    };
    let voice_text = build_voice_text(&native_view);

    RenderedSummary { chinese_summary, user_language_summary, voice_text }
}

fn render_item_list(view: &View, prefix: Option<&str>) -> String {
    if view.items.is_empty() || view.items.iter().all(|i| i.name.trim().is_empty()) {
        tracing::warn!("summary has no nameable items, using fallback text");
        return FALLBACK_SUMMARY.to_string();
    }

    let body = view
        .items
        .iter()
        .map(|i| format!("{} x {}", i.name, i.quantity))
        .collect::<Vec<_>>()
        .join("、");

    match prefix {
        Some(p) => format!("{p}{body}"),
        None => body,
    }
}

fn is_drink(name: &str) -> bool {
    DRINK_MARKERS.iter().any(|m| name.contains(m))
}

fn quantity_phrase(q: i32) -> String {
    if q == 1 { "一".to_string() } else { q.to_string() }
}

/// Builds the natural Mandarin sentence fed to TTS (spec §4.5 step 4).
fn build_voice_text(native_view: &View) -> String {
    if native_view.items.is_empty() || native_view.items.iter().all(|i| i.name.trim().is_empty()) {
        return "老闆,我要點餐,謝謝。".to_string();
    }

    let phrases: Vec<String> = native_view
        .items
        .iter()
        .map(|i| {
            let classifier = if is_drink(&i.name) { "杯" } else { "份" };
            format!("{}{}{}", i.name, quantity_phrase(i.quantity), classifier)
        })
        .collect();

    let joined = match phrases.len() {
        0 => unreachable!(),
        1 => phrases[0].clone(),
        _ => {
            let (last, rest) = phrases.split_last().unwrap();
            format!("{}和{}", rest.join("、"), last)
        }
    };

    format!("老闆,我要{joined},謝謝。")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(original: &str, translated: &str, qty: i32, price: i64) -> CanonicalItem {
        CanonicalItem {
            original: original.into(),
            translated: translated.into(),
            quantity: qty,
            price,
            menu_item_id: None,
        }
    }

    async fn identity(s: String) -> String {
        s
    }

    #[tokio::test]
    async fn s1_two_item_order_renders_expected_strings() {
        let cart = vec![
            item("招牌金湯酸菜", "Signature Golden Soup Pickled Cabbage", 1, 68),
            item("白濃雞湯", "White Thick Chicken Soup", 1, 49),
        ];
        let rendered = render("店家", &cart, "en", |s| async move {
            match s.as_str() {
                "招牌金湯酸菜" => "Signature Golden Soup Pickled Cabbage".to_string(),
                "白濃雞湯" => "White Thick Chicken Soup".to_string(),
                other => other.to_string(),
            }
        }).await;

        assert_eq!(rendered.chinese_summary, "招牌金湯酸菜 x 1、白濃雞湯 x 1");
        assert_eq!(
            rendered.user_language_summary,
            "Order: Signature Golden Soup Pickled Cabbage x 1、White Thick Chicken Soup x 1"
        );
        assert_eq!(rendered.voice_text, "老闆,我要招牌金湯酸菜一份和白濃雞湯一份,謝謝。");
    }

    #[tokio::test]
    async fn chinese_caller_gets_identical_summaries() {
        let cart = vec![item("珍珠奶茶", "Bubble Milk Tea", 2, 60)];
        let rendered = render("店家", &cart, "zh-TW", identity).await;
        assert_eq!(rendered.chinese_summary, rendered.user_language_summary);
    }

    #[test]
    fn empty_cart_uses_fallback_text() {
        let view = View { store_name: "x".into(), items: vec![], total: 0 };
        assert_eq!(render_item_list(&view, None), FALLBACK_SUMMARY);
    }

    #[test]
    fn drinks_get_cup_classifier_others_get_portion() {
        let view = View {
            store_name: "x".into(),
            items: vec![
                ViewItem { name: "珍珠奶茶".into(), quantity: 1, price: 60 },
                ViewItem { name: "白濃雞湯".into(), quantity: 1, price: 49 },
            ],
            total: 109,
        };
        let text = build_voice_text(&view);
        assert!(text.contains("珍珠奶茶一杯"));
        assert!(text.contains("白濃雞湯一份"));
    }

    #[test]
    fn single_item_voice_text_has_no_conjunction() {
        let view = View {
            store_name: "x".into(),
            items: vec![ViewItem { name: "炒飯".into(), quantity: 2, price: 80 }],
            total: 160,
        };
        assert_eq!(build_voice_text(&view), "老闆,我要炒飯2份,謝謝。");
    }
}
