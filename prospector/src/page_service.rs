use anyhow::{Context, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// Preference order. Only the first tag per selector is looked at.
static DESCRIPTION_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        r#"meta[name="description"]"#,
        r#"meta[property="og:description"]"#,
        r#"meta[name="twitter:description"]"#,
    ]
    .iter()
    .map(|s| Selector::parse(s).expect("meta description selector"))
    .collect()
});

pub struct PageService {
    client: Client,
}

impl PageService {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("Failed to build page fetch client")?;

        Ok(Self { client })
    }

    /// Downloads the page body. Error statuses are only logged; their body
    /// is returned like any other.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        log::info!("Fetching page: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Page {} answered with status {}", url, status);
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;

        log::info!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

/// Host of the URL (with its port when non-default), minus a leading `www.`.
pub fn root_domain(url: &str) -> Result<String> {
    let parsed = Url::parse(url.trim()).with_context(|| format!("Invalid URL: {}", url))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("URL has no host: {}", url))?;

    let host = host.strip_prefix("www.").unwrap_or(host);
    let domain = match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    Ok(domain)
}

pub fn extract_meta_description(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    DESCRIPTION_SELECTORS.iter().find_map(|selector| {
        document
            .select(selector)
            .next()
            .and_then(|element| element.value().attr("content"))
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::get, Router};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_root_domain_strips_www() {
        assert_eq!(root_domain("https://www.example.com/shop?x=1").unwrap(), "example.com");
        assert_eq!(root_domain("http://blog.example.org").unwrap(), "blog.example.org");
        assert_eq!(root_domain("http://www.example.com:8080/").unwrap(), "example.com:8080");
        assert_eq!(root_domain("https://example.com:443/").unwrap(), "example.com");
    }

    #[test]
    fn test_root_domain_rejects_invalid_urls() {
        assert!(root_domain("example.com").is_err());
        assert!(root_domain("not a url").is_err());
    }

    #[test]
    fn test_meta_description_preference_order() {
        let html = r#"<html><head>
            <meta name="twitter:description" content="Twitter text">
            <meta property="og:description" content="Open Graph text">
            <meta name="description" content="  Plain description  ">
            </head><body></body></html>"#;

        assert_eq!(extract_meta_description(html).as_deref(), Some("Plain description"));
    }

    #[test]
    fn test_meta_description_skips_empty_content() {
        let html = r#"<head>
            <meta name="description" content="   ">
            <meta name="twitter:description" content="Twitter text">
            </head>"#;

        assert_eq!(extract_meta_description(html).as_deref(), Some("Twitter text"));
        assert_eq!(extract_meta_description("<p>No meta here</p>"), None);
    }

    #[test]
    fn test_meta_description_uses_first_tag_of_each_kind() {
        let html = r#"<head>
            <meta name="description" content="">
            <meta name="description" content="Second description">
            <meta property="og:description" content="Open Graph text">
            </head>"#;

        assert_eq!(extract_meta_description(html).as_deref(), Some("Open Graph text"));
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let app = Router::new().route(
            "/",
            get(|headers: HeaderMap| async move {
                let agent = headers
                    .get("user-agent")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                axum::response::Html(format!(r#"<meta name="description" content="{}">"#, agent))
            }),
        );
        let base = serve(app).await;

        let body = PageService::new().unwrap().fetch(&base).await.unwrap();
        assert_eq!(extract_meta_description(&body).as_deref(), Some("Mozilla/5.0"));
    }

    #[tokio::test]
    async fn test_fetch_keeps_error_page_body() {
        let app = Router::new().route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, "<meta name=\"description\" content=\"Gone\">") }),
        );
        let base = serve(app).await;

        let body = PageService::new()
            .unwrap()
            .fetch(&format!("{}/missing", base))
            .await
            .unwrap();
        assert_eq!(extract_meta_description(&body).as_deref(), Some("Gone"));
    }
}
