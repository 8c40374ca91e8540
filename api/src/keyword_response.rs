use prospector::{ExtractionStrategy, KeywordExport, ProspectReport};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
pub struct KeywordResponse {
    pub status: String,
    pub root_domain: String,
    pub meta_description: Option<String>,
    pub keywords: Vec<String>,
    pub keywords_line: String,
    pub strategy: Option<ExtractionStrategy>,
    pub needs_manual_entry: bool,
    pub export: KeywordExport,
    pub response_text: String,
}

impl From<ProspectReport> for KeywordResponse {
    fn from(report: ProspectReport) -> Self {
        Self {
            status: "success".to_string(),
            keywords_line: report.display_line(),
            needs_manual_entry: report.needs_manual_entry(),
            export: report.export(),
            root_domain: report.root_domain,
            meta_description: report.meta_description,
            keywords: report.keywords,
            strategy: report.strategy,
            response_text: report.response_text,
        }
    }
}
