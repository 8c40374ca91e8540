use serde::Serialize;

pub const API_KEY_HINT: &str =
    "Please check your OpenAI API key. Make sure it has access to the GPT-4o model.";

/// What the operator sees when an analysis fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureNotice {
    pub message: String,
    pub hint: Option<String>,
}

impl FailureNotice {
    pub fn from_error(error: &anyhow::Error) -> Self {
        // {:#} keeps the context chain on one line.
        let text = format!("{:#}", error);
        let hint = mentions_api_key(&text).then(|| API_KEY_HINT.to_string());

        Self {
            message: format!("An error occurred: {}", text),
            hint,
        }
    }
}

fn mentions_api_key(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.contains("api key") || lowered.contains("api_key")
}
