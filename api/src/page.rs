use htmlentity::entity::{encode, CharacterSet, EncodeType, ICodedDataTrait};
use prospector::{FailureNotice, KeywordExport, ProspectReport};

const TITLE: &str = "Link Building Prospecting Keywords Tool";

pub fn escape(text: &str) -> String {
    encode(text.as_bytes(), &EncodeType::Named, &CharacterSet::SpecialChars)
        .to_string()
        .unwrap_or_default()
}

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{TITLE}</title>
</head>
<body>
<h1>&#128279; {TITLE}</h1>
<p>Generate targeted prospecting keywords for link building based on a website's meta description.</p>
{body}
<hr>
<p>&#128279; {TITLE} | Built with axum + OpenAI</p>
</body>
</html>
"#
    )
}

fn analyze_form(url: &str) -> String {
    format!(
        r#"<form method="post" action="/analyze">
<label>Enter a URL to analyze: <input type="url" name="url" value="{}" placeholder="https://example.com" required></label>
<label>Enter your OpenAI API key: <input type="password" name="api_key" placeholder="sk-..." required></label>
<button type="submit">Generate keywords</button>
</form>"#,
        escape(url)
    )
}

const INSTRUCTIONS: &str = r#"<hr>
<h3>How to use this tool:</h3>
<ol>
<li>Enter a URL you want to analyze</li>
<li>Provide your OpenAI API key (it's only used for this request and not stored)</li>
<li>The tool will extract the root domain and meta description from the URL</li>
<li>It will generate prospecting keywords using GPT-4o</li>
<li>The results will show the top 5 keywords for link building opportunities</li>
</ol>
<h3>Requirements:</h3>
<ul>
<li>OpenAI API key with access to the GPT-4o model</li>
<li>Valid URL with meta description (or at least accessible website)</li>
</ul>"#;

pub fn index_page() -> String {
    layout(&format!("{}\n{}", analyze_form(""), INSTRUCTIONS))
}

pub fn failure_page(url: &str, notice: &FailureNotice) -> String {
    let mut body = format!(r#"<p class="error">{}</p>"#, escape(&notice.message));
    if let Some(hint) = &notice.hint {
        body.push_str(&format!(r#"<p class="warning">{}</p>"#, escape(hint)));
    }
    body.push_str(&analyze_form(url));
    body.push_str(INSTRUCTIONS);
    layout(&body)
}

pub fn download_link(export: &KeywordExport, domain: &str) -> String {
    let href = format!(
        "/download?domain={}&keywords={}",
        urlencoding::encode(domain),
        urlencoding::encode(&export.content)
    );
    format!(
        r#"<p><a href="{}" download="{}">Download Keywords as CSV</a></p>"#,
        escape(&href),
        escape(&export.file_name)
    )
}

fn keyword_list(keywords: &[String]) -> String {
    let items: String = keywords
        .iter()
        .enumerate()
        .map(|(i, keyword)| format!("<li>Keyword {}: <strong>{}</strong></li>\n", i + 1, escape(keyword)))
        .collect();
    format!("<ol class=\"keywords\">\n{}</ol>", items)
}

pub fn report_page(report: &ProspectReport) -> String {
    let mut body = format!(
        "<p>Root Domain: <strong>{}</strong></p>\n",
        escape(&report.root_domain)
    );

    match &report.meta_description {
        Some(description) => body.push_str(&format!(
            "<p><strong>Meta Description:</strong></p>\n<blockquote>{}</blockquote>\n",
            escape(description)
        )),
        None => body.push_str(
            "<p class=\"warning\">No meta description found for this URL. Using domain name only.</p>\n",
        ),
    }

    if report.needs_manual_entry() {
        body.push_str(&manual_entry_section(report));
    } else {
        body.push_str("<h2>Top 5 Prospecting Keywords:</h2>\n");
        body.push_str(&keyword_list(&report.keywords));
        body.push_str(&format!(
            "\n<p class=\"success\">{}</p>\n",
            escape(&report.display_line())
        ));
        body.push_str(&download_link(&report.export(), &report.root_domain));
        body.push_str(&format!(
            "<details><summary>View complete keyword analysis</summary><pre>{}</pre></details>\n",
            escape(&report.response_text)
        ));
    }

    body.push_str(&analyze_form(""));
    layout(&body)
}

fn manual_entry_section(report: &ProspectReport) -> String {
    format!(
        r#"<p class="warning">Could not automatically extract keywords. Please check the GPT-4o response below and manually identify keywords.</p>
<label>GPT-4o Response for Manual Review:<br><textarea readonly rows="16" cols="100">{}</textarea></label>
<p>It appears the AI didn't format the response as expected. To manually extract keywords:</p>
<ol>
<li>Look for sections labeled "Step 5" or "Final keywords"</li>
<li>Identify numbered lists with short 1-2 word phrases</li>
<li>Select the 5 most relevant keywords from the response</li>
</ol>
<h2>Enter Keywords Manually</h2>
<form method="post" action="/manual">
<input type="hidden" name="domain" value="{}">
<label>Enter up to 5 keywords separated by commas: <input type="text" name="keywords" required></label>
<button type="submit">Save Keywords</button>
</form>
"#,
        escape(&report.response_text),
        escape(&report.root_domain)
    )
}

pub fn manual_page(domain: &str, keywords: &[String]) -> String {
    let body = if keywords.is_empty() {
        "<p class=\"error\">No keywords entered.</p>\n".to_string()
    } else {
        let export = KeywordExport::new(domain, keywords);
        format!(
            "<p class=\"success\">Manually added keywords: {}</p>\n{}",
            escape(&keywords.join(", ")),
            download_link(&export, domain)
        )
    };

    layout(&format!("{}{}", body, analyze_form("")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(keywords: &[&str]) -> ProspectReport {
        ProspectReport {
            root_domain: "shop.example".to_string(),
            meta_description: Some("Tea & <coffee>".to_string()),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            strategy: None,
            response_text: "raw <b>response</b>".to_string(),
        }
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(escape(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn test_report_page_lists_keywords() {
        let html = report_page(&report(&["green tea", "matcha"]));

        assert!(html.contains("Root Domain: <strong>shop.example</strong>"));
        assert!(html.contains("Tea &amp; &lt;coffee&gt;"));
        assert!(html.contains("Keyword 2: <strong>matcha</strong>"));
        assert!(html.contains("green tea, matcha"));
        assert!(html.contains("/download?domain=shop.example&amp;keywords=green%20tea%2Cmatcha"));
        assert!(!html.contains("<b>response</b>"));
    }

    #[test]
    fn test_report_page_offers_manual_entry() {
        let html = report_page(&report(&[]));

        assert!(html.contains("GPT-4o Response for Manual Review"));
        assert!(html.contains(r#"action="/manual""#));
        assert!(html.contains(r#"name="domain" value="shop.example""#));
        assert!(html.contains("raw &lt;b&gt;response&lt;/b&gt;"));
    }

    #[test]
    fn test_index_page_has_password_field() {
        let html = index_page();

        assert!(html.contains(r#"type="password" name="api_key""#));
        assert!(html.contains("How to use this tool:"));
    }
}
