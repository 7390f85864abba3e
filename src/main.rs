use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncReadExt;
use url::Url;

use seo_checker::domain::models::ResourceStatus;
use seo_checker::{lifecycle, report, AnalysisResponse, AnalyzerSettings, HtmlDocument};
use seo_checker::{PageAnalyzer, ResourceChecker};

mod args;
use args::{Args, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    lifecycle::init_logging(args.verbose);

    let mut settings = match &args.config {
        Some(path) => AnalyzerSettings::from_file(path)?,
        None => AnalyzerSettings::default(),
    };
    if args.check_robots {
        settings.check_robots_txt = true;
    }

    let html = read_input(&args).await?;
    let doc = HtmlDocument::parse(&html, &args.url)
        .with_context(|| format!("Invalid page URL: {}", args.url))?;

    let analyzer = PageAnalyzer::new(&settings);
    let context_id = args.input.display().to_string();
    let response = analyzer.analyze(&context_id, &doc);

    let robots_txt = if settings.check_robots_txt && response.is_ok() {
        check_robots(&settings, &args.url).await
    } else {
        None
    };

    match args.format {
        OutputFormat::Json => {
            let mut payload = serde_json::to_value(&response)?;
            if let (Some(status), Some(map)) = (&robots_txt, payload.as_object_mut()) {
                map.insert("robotsTxt".to_string(), serde_json::to_value(status)?);
            }
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Text => match &response {
            AnalysisResponse::Result { facts, score, .. } => {
                print!("{}", report::render_text(facts, score, robots_txt.as_ref()));
            }
            AnalysisResponse::Error { error, .. } => eprintln!("Analysis failed: {}", error),
        },
    }

    if !response.is_ok() {
        std::process::exit(1);
    }
    Ok(())
}

async fn read_input(args: &Args) -> Result<String> {
    if args.reads_stdin() {
        let mut html = String::new();
        tokio::io::stdin()
            .read_to_string(&mut html)
            .await
            .context("Failed to read HTML from stdin")?;
        Ok(html)
    } else {
        tokio::fs::read_to_string(&args.input)
            .await
            .with_context(|| format!("Failed to read {}", args.input.display()))
    }
}

/// A failed check is reported in the logs and left out of the report.
async fn check_robots(settings: &AnalyzerSettings, page_url: &str) -> Option<ResourceStatus> {
    let page_url = Url::parse(page_url).ok()?;
    let checker = match ResourceChecker::new(settings) {
        Ok(checker) => checker,
        Err(e) => {
            log::warn!("[RESOURCE] Could not build HTTP client: {}", e);
            return None;
        }
    };

    match checker.check_robots_txt(&page_url).await {
        Ok(status) => Some(status),
        Err(e) => {
            log::warn!("[RESOURCE] robots.txt check failed: {}", e);
            None
        }
    }
}
