use crate::keyword_extractor::KeywordExtractor;
use crate::models::*;
use crate::openai_service::{build_prompt, OpenAiService};
use crate::page_service::{extract_meta_description, root_domain, PageService};
use anyhow::Result;
use std::sync::Arc;

pub struct ProspectService {
    page_service: Arc<PageService>,
    openai_service: Arc<OpenAiService>,
    extractor: KeywordExtractor,
}

impl ProspectService {
    pub fn new(page_service: Arc<PageService>, openai_service: Arc<OpenAiService>) -> Self {
        Self {
            page_service,
            openai_service,
            extractor: KeywordExtractor::new(),
        }
    }

    /// Runs fetch, meta lookup, prompt, completion and keyword extraction for
    /// one URL. An empty keyword list is a valid outcome.
    pub async fn analyze(&self, url: &str, api_key: &str) -> Result<ProspectReport> {
        let start_time = std::time::Instant::now();

        let root_domain = root_domain(url)?;
        log::info!("Root domain: {}", root_domain);

        let html = self.page_service.fetch(url).await?;
        let meta_description = extract_meta_description(&html);
        let description = match &meta_description {
            Some(description) => description.clone(),
            None => {
                log::warn!("No meta description found for {}, using domain name only", url);
                format!("Website with domain {}", root_domain)
            }
        };

        let prompt = build_prompt(&root_domain, &description);
        let response_text = self.openai_service.complete(api_key, &prompt).await?;

        let extraction = self.extractor.extract(&response_text);
        log::info!(
            "Analysis of {} finished in {} ms",
            root_domain,
            start_time.elapsed().as_millis()
        );

        Ok(ProspectReport {
            root_domain,
            meta_description,
            keywords: extraction.keywords,
            strategy: extraction.strategy,
            response_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProspectorConfig;
    use crate::keyword_extractor::ExtractionStrategy;
    use axum::{routing::get, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    // The stub model echoes the line of the prompt that carries the description.
    fn stub_app(page: &'static str) -> Router {
        Router::new()
            .route("/page", get(move || async move { axum::response::Html(page) }))
            .route(
                "/v1/chat/completions",
                post(|Json(body): Json<Value>| async move {
                    let prompt = body["messages"][1]["content"].as_str().unwrap_or_default();
                    let description = prompt
                        .lines()
                        .skip_while(|line| *line != "<meta_description>")
                        .nth(1)
                        .unwrap_or_default();
                    let content = format!(
                        "Description: {}\n<step_5_keywords>\n1. [Surf Boards]\n2. [Wetsuits]\n</step_5_keywords>",
                        description
                    );
                    Json(json!({ "choices": [{ "message": { "content": content } }] }))
                }),
            )
    }

    fn service(base: &str) -> ProspectService {
        let config = ProspectorConfig {
            openai_base_url: format!("{}/v1", base),
            ..ProspectorConfig::default()
        };
        ProspectService::new(
            Arc::new(PageService::new().unwrap()),
            Arc::new(OpenAiService::new(&config)),
        )
    }

    #[tokio::test]
    async fn test_analyze_with_meta_description() {
        let base = serve(stub_app(r#"<meta property="og:description" content="Surf shop in Biarritz">"#)).await;

        let report = service(&base)
            .analyze(&format!("{}/page", base), "sk-test-key-123456")
            .await
            .unwrap();

        assert_eq!(report.root_domain, base.trim_start_matches("http://"));
        assert_eq!(report.meta_description.as_deref(), Some("Surf shop in Biarritz"));
        assert_eq!(report.keywords, vec!["Surf Boards", "Wetsuits"]);
        assert_eq!(report.strategy, Some(ExtractionStrategy::TaggedSection));
        assert!(report.response_text.starts_with("Description: Surf shop in Biarritz"));
    }

    #[tokio::test]
    async fn test_analyze_without_meta_description_uses_domain() {
        let base = serve(stub_app("<html><body>Nothing here</body></html>")).await;
        let domain = base.trim_start_matches("http://").to_string();

        let report = service(&base)
            .analyze(&format!("{}/page", base), "sk-test-key-123456")
            .await
            .unwrap();

        assert_eq!(report.meta_description, None);
        assert!(report
            .response_text
            .starts_with(&format!("Description: Website with domain {}", domain)));
    }

    #[tokio::test]
    async fn test_analyze_rejects_invalid_url() {
        let report = service("http://127.0.0.1:9").analyze("not a url", "sk-test-key-123456").await;

        assert!(report.is_err());
    }
}
