//! Translation contract client (spec §4.11, §6 "Translation contract").
//! Any failure degrades to identity — this component never throws into
//! the pipeline.

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a [&'a str],
    target: &'a str,
    format: &'static str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

const ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

pub async fn translate(http: &reqwest::Client, api_key: &str, text: &str, target: &str) -> String {
    translate_batch(http, api_key, &[text], target)
        .await
        .into_iter()
        .next()
        .unwrap_or_else(|| text.to_string())
}

pub async fn translate_batch(
    http: &reqwest::Client,
    api_key: &str,
    texts: &[&str],
    target: &str,
) -> Vec<String> {
    if texts.is_empty() {
        return Vec::new();
    }
    let fallback = || texts.iter().map(|t| t.to_string()).collect();

    let request = TranslateRequest { q: texts, target, format: "text" };
    let result: Result<TranslateResponse, reqwest::Error> = async {
        http.post(ENDPOINT)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
    .await;

    match result {
        Ok(resp) if resp.data.translations.len() == texts.len() => resp
            .data
            .translations
            .into_iter()
            .map(|t| t.translated_text)
            .collect(),
        Ok(_) => {
            tracing::warn!("translation backend returned mismatched item count, falling back to identity");
            fallback()
        }
        Err(e) => {
            tracing::warn!(error = %e, "translation call failed, falling back to identity");
            fallback()
        }
    }
}
