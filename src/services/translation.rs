//! Translation Facade (C11, spec §4.11). Thin wrapper binding the external
//! client to a config-supplied API key; language tag normalisation lives in
//! `models::language` since it is pure lookup data, not an I/O concern.

use crate::external::translation;

pub use crate::models::language::normalize;

pub async fn translate(http: &reqwest::Client, api_key: &str, text: &str, target: &str) -> String {
    translation::translate(http, api_key, text, normalize(target)).await
}

pub async fn translate_batch(
    http: &reqwest::Client,
    api_key: &str,
    texts: &[&str],
    target: &str,
) -> Vec<String> {
    translation::translate_batch(http, api_key, texts, normalize(target)).await
}
