// Terminal front-end for the keyword tool; the web version lives in ../api

use anyhow::{Context, Result};
use prospector::{
    parse_manual_entry, FailureNotice, KeywordExport, OpenAiService, PageService,
    ProspectService, ProspectorConfig,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let mut save = false;
    let mut url_arg = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--save" => save = true,
            _ => url_arg = Some(arg),
        }
    }

    let config = ProspectorConfig::from_env();
    let service = ProspectService::new(
        Arc::new(PageService::new()?),
        Arc::new(OpenAiService::new(&config)),
    );

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let url = match url_arg {
        Some(url) => url,
        None => ask(&mut input, "Enter a URL to analyze: ").await?,
    };
    let api_key = ask(&mut input, "Enter your OpenAI API key: ").await?;
    if url.is_empty() || api_key.is_empty() {
        anyhow::bail!("Both a URL and an API key are required");
    }

    let report = match service.analyze(&url, &api_key).await {
        Ok(report) => report,
        Err(e) => {
            let notice = FailureNotice::from_error(&e);
            eprintln!("{}", notice.message);
            if let Some(hint) = notice.hint {
                eprintln!("{}", hint);
            }
            std::process::exit(1);
        }
    };

    println!("Root Domain: {}", report.root_domain);
    match &report.meta_description {
        Some(description) => println!("Meta Description: {}", description),
        None => println!("No meta description found for this URL. Using domain name only."),
    }

    let export = if report.needs_manual_entry() {
        println!("Could not automatically extract keywords. Full model response:\n");
        println!("{}\n", report.response_text);
        let entry = ask(&mut input, "Enter up to 5 keywords separated by commas: ").await?;
        let manual = parse_manual_entry(&entry);
        if manual.keywords.is_empty() {
            println!("No keywords entered.");
            return Ok(());
        }
        println!("Manually added keywords: {}", manual.keywords.join(", "));
        KeywordExport::new(&report.root_domain, &manual.keywords)
    } else {
        println!("\nTop 5 Prospecting Keywords:");
        for (i, keyword) in report.keywords.iter().enumerate() {
            println!("  Keyword {}: {}", i + 1, keyword);
        }
        println!("\n{}", report.display_line());
        report.export()
    };

    if save {
        tokio::fs::write(&export.file_name, &export.content)
            .await
            .with_context(|| format!("Failed to write {}", export.file_name))?;
        println!("Saved {}", export.file_name);
    }

    Ok(())
}

async fn ask(input: &mut Lines<BufReader<Stdin>>, prompt: &str) -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;

    let line = input.next_line().await?.unwrap_or_default();
    Ok(line.trim().to_string())
}
