use serde::Deserialize;

#[derive(Deserialize)]
pub struct ManualRequest {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub keywords: String,
}

#[derive(Deserialize)]
pub struct DownloadQuery {
    pub domain: String,
    #[serde(default)]
    pub keywords: String,
}
