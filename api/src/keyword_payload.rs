use serde::Deserialize;

/// Body of `POST /api/keywords`; the key travels in the bearer header.
#[derive(Deserialize)]
pub struct KeywordPayload {
    pub url: String,
}

/// The HTML form fields of `POST /analyze`.
#[derive(Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
}
