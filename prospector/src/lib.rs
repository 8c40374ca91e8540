pub mod config;
pub mod failure;
pub mod keyword_extractor;
pub mod models;
pub mod openai_service;
pub mod page_service;
pub mod prospect_service;

pub use config::ProspectorConfig;
pub use failure::FailureNotice;
pub use keyword_extractor::{parse_manual_entry, Extraction, ExtractionStrategy, KeywordExtractor};
pub use models::*;
pub use openai_service::OpenAiService;
pub use page_service::PageService;
pub use prospect_service::ProspectService;
