use crate::config::ProspectorConfig;
use crate::models::*;
use anyhow::{Context, Result};
use reqwest::Client;

const SYSTEM_PROMPT: &str = "You are a helpful link building assistant.";

pub struct OpenAiService {
    client: Client,
    base_url: String,
    model: String,
}

impl OpenAiService {
    pub fn new(config: &ProspectorConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one non-streaming chat completion and returns the reply text.
    /// No timeout and no retry: the call runs to completion or fails.
    pub async fn complete(&self, api_key: &str, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            stream: false,
        };

        let url = format!("{}/chat/completions", self.base_url);
        log::info!(
            "Requesting keywords from {} with key {}",
            self.model,
            mask_api_key(api_key)
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .context("OpenAI request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|body| body.error.message)
                .unwrap_or(error_text);
            return Err(anyhow::anyhow!("OpenAI API error ({}): {}", status, message));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Unreadable OpenAI response")?;

        let answer = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("OpenAI response contained no choices"))?
            .message
            .content
            .unwrap_or_default();

        log::info!("Received {} characters from {}", answer.len(), self.model);
        Ok(answer)
    }
}

/// Keeps the first and last four characters of a key for log lines.
pub fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

pub fn build_prompt(root_domain: &str, meta_description: &str) -> String {
    let output_blocks: String = (1..=5)
        .map(|step| {
            format!(
                "<step_{step}_keywords>\n1. [Keyword 1]\n2. [Keyword 2]\n3. [Keyword 3]\n...\n</step_{step}_keywords>\n"
            )
        })
        .collect();

    format!(
        r#"# Task Instructions
You are a Link Builder for {root_domain}. Your task is to create a list of 5 prospecting keywords that, when searched in Google, will help you find blogs and websites that are relevant to {root_domain}'s products. These blogs should be potential candidates for link building opportunities.
First, review the website's meta description to better understand the website's products and industry.
<meta_description>
{meta_description}
</meta_description>
Next, follow these instructions step-by-step.
Step 1. Identify the 3 most relevant keywords that describe the website's main top-level categories.
Step 2. Identify the 3 most relevant keywords that describe the website's specific product categories.
Step 3. Identify the 3 most relevant keywords that describe the website's broader categories.
Step 4. Identify the 3 most relevant industries the website belongs to.
Step 5. Review the final list of all keywords and select just the top 5 most relevant keywords that would match relevant article titles.
Guidelines
 - All keywords must be short and only contain 1-2 words so they can match more relevant articles.
 - Skip any overly general keywords that could return irrelevant blogs and websites for a different search intent.
 - Avoid the use of adjectives (cheap, used, etc.).
 - Avoid overly generic terms or common words that have multiple meanings/applications and could match irrelevant articles (equipment, tools, DIY, solutions).
# Output Format
Provide a separate list for each of the steps above. Present your list of keywords in the following format:
{output_blocks}Remember to focus on keywords that will help you find relevant articles that are likely to be interested in the client's products and could potentially become link building partners.
"#
    )
}
