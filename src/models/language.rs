//! Static language lookup table (spec §3, §4.11). Read-only process state.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct Language {
    /// Short tag used internally and by the translation/speech facades.
    pub tag: &'static str,
    pub display_name: &'static str,
    /// Voice name fragment passed to TTS when rendering this language's native voice text.
    pub speech_tag: &'static str,
}

use serde::Serialize;

const TABLE: &[Language] = &[
    Language { tag: "en", display_name: "English", speech_tag: "en-US" },
    Language { tag: "zh-tw", display_name: "繁體中文", speech_tag: "cmn-TW" },
    Language { tag: "zh-cn", display_name: "简体中文", speech_tag: "cmn-CN" },
    Language { tag: "ja", display_name: "日本語", speech_tag: "ja-JP" },
    Language { tag: "ko", display_name: "한국어", speech_tag: "ko-KR" },
    Language { tag: "fr", display_name: "Français", speech_tag: "fr-FR" },
    Language { tag: "de", display_name: "Deutsch", speech_tag: "de-DE" },
    Language { tag: "es", display_name: "Español", speech_tag: "es-ES" },
    Language { tag: "it", display_name: "Italiano", speech_tag: "it-IT" },
    Language { tag: "pt", display_name: "Português", speech_tag: "pt-PT" },
    Language { tag: "ru", display_name: "Русский", speech_tag: "ru-RU" },
    Language { tag: "ar", display_name: "العربية", speech_tag: "ar-XA" },
    Language { tag: "hi", display_name: "हिन्दी", speech_tag: "hi-IN" },
    Language { tag: "th", display_name: "ไทย", speech_tag: "th-TH" },
    Language { tag: "vi", display_name: "Tiếng Việt", speech_tag: "vi-VN" },
];

pub const DEFAULT_TAG: &str = "en";

/// Maps a BCP-47 tag to the supported short set, falling back to `en` (C11, R2).
pub fn normalize(tag: &str) -> &'static str {
    let lower = tag.to_ascii_lowercase();
    if lower.starts_with("zh") {
        return if lower.contains("cn") || lower.contains("hans") {
            "zh-cn"
        } else {
            "zh-tw"
        };
    }
    let prefix = lower.split(['-', '_']).next().unwrap_or(&lower);
    TABLE
        .iter()
        .find(|l| l.tag == prefix)
        .map(|l| l.tag)
        .unwrap_or(DEFAULT_TAG)
}

/// True for any tag `normalize` maps into the Chinese family (spec §4.5 step 4: prefix-match on `zh`).
pub fn is_chinese(tag: &str) -> bool {
    tag.to_ascii_lowercase().starts_with("zh")
}

pub fn lookup(tag: &str) -> Language {
    let normalized = normalize(tag);
    TABLE
        .iter()
        .find(|l| l.tag == normalized)
        .copied()
        .unwrap_or(TABLE[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_falls_back_to_english() {
        assert_eq!(normalize("xx-YY"), "en");
    }

    #[test]
    fn zh_variants_collapse_to_traditional_by_default() {
        assert_eq!(normalize("zh"), "zh-tw");
        assert_eq!(normalize("zh-Hant"), "zh-tw");
        assert_eq!(normalize("zh-TW"), "zh-tw");
    }

    #[test]
    fn zh_cn_variants_map_to_simplified() {
        assert_eq!(normalize("zh-CN"), "zh-cn");
        assert_eq!(normalize("zh-Hans"), "zh-cn");
    }

    #[test]
    fn idempotent_under_repeated_normalisation() {
        for raw in ["en", "ja-JP", "zh-tw", "xx"] {
            let once = normalize(raw);
            assert_eq!(normalize(once), once);
        }
    }

    #[test]
    fn is_chinese_prefix_match() {
        assert!(is_chinese("zh"));
        assert!(is_chinese("zh-TW"));
        assert!(is_chinese("zh-Hant"));
        assert!(!is_chinese("ja"));
    }
}
