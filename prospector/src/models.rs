use crate::keyword_extractor::ExtractionStrategy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProspectReport {
    pub root_domain: String,
    pub meta_description: Option<String>,
    pub keywords: Vec<String>,
    pub strategy: Option<ExtractionStrategy>,
    pub response_text: String,
}

impl ProspectReport {
    pub fn needs_manual_entry(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn display_line(&self) -> String {
        self.keywords.join(", ")
    }

    pub fn export(&self) -> KeywordExport {
        KeywordExport::new(&self.root_domain, &self.keywords)
    }
}

/// The downloadable keyword file: one comma-joined line, no header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordExport {
    pub file_name: String,
    pub content: String,
}

impl KeywordExport {
    pub const MIME_TYPE: &'static str = "text/csv";

    pub fn new(root_domain: &str, keywords: &[String]) -> Self {
        Self {
            file_name: format!("{}_keywords.csv", root_domain),
            content: keywords.join(","),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}
