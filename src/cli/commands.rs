use std::path::Path;
use std::sync::Arc;

use url::Url;

use crate::app::{AppContext, Result};
use crate::cli::RunArgs;
use crate::config::Settings;
use crate::domain::{ConfigBundle, LinkCandidate, Provider};
use crate::fetcher::{load_page, PageSource};
use crate::render::{ConsoleRenderer, PageRenderer, Renderer};
use crate::scheduler::{PacingConfig, RunReport};

const DEFAULT_SYSTEM_PROMPT: &str = "Summarize the following text in 50-100 words, focusing on \
the key arguments and findings, in a style suitable for Hacker News readers (developers and \
tech enthusiasts). Provide a concise, informative summary.";

pub async fn run(ctx: &AppContext, args: &RunArgs) -> Result<()> {
    let page_url = Url::parse(args.page.as_deref().unwrap_or(&ctx.settings.page.url))?;
    let source = match args.input {
        Some(ref path) => PageSource::File(path.clone()),
        None => PageSource::Url(page_url.to_string()),
    };

    let pacing = PacingConfig {
        batch_size: args.batch_size.unwrap_or(ctx.settings.pacing.batch_size),
        cooldown_ms: args.cooldown_ms.unwrap_or(ctx.settings.pacing.cooldown_ms),
    };
    let policy = pacing.policy()?;

    let html = load_page(ctx.fetcher.as_ref(), &source).await?;
    let link_selector = &ctx.settings.page.link_selector;

    match args.output {
        Some(ref output) => {
            let page = Arc::new(PageRenderer::new(page_url.clone(), link_selector.clone()));
            let scheduler = ctx.scheduler(page.clone(), policy);
            let (_, report) = scheduler.run_page(&html, &page_url, link_selector).await?;

            tokio::fs::write(output, page.rewrite(&html)?).await?;
            println!("Wrote {} summaries to {}", page.len(), output.display());
            print_report(&report);
        }
        None => {
            let renderer: Arc<dyn Renderer> = Arc::new(ConsoleRenderer);
            let scheduler = ctx.scheduler(renderer, policy);
            let (_, report) = scheduler.run_page(&html, &page_url, link_selector).await?;
            print_report(&report);
        }
    }

    Ok(())
}

pub async fn extract(ctx: &AppContext, url: &str) -> Result<()> {
    let bundle = ctx.bundle().await?;

    match ctx.extractor.extract(url, &bundle.proxy_url_prefix).await {
        Some(text) => println!("{}", text),
        None => eprintln!("Failed to fetch or extract content."),
    }

    Ok(())
}

pub async fn summarize(ctx: &AppContext, url: &str) -> Result<()> {
    let candidate = Arc::new(LinkCandidate::new(url));
    if !candidate.is_eligible(&ctx.settings.page.discussion_prefix) {
        println!("Not summarizing {}: not an external article link", url);
        return Ok(());
    }

    let scheduler = ctx.scheduler(Arc::new(ConsoleRenderer), PacingConfig::default().policy()?);
    scheduler.run(&[candidate]).await?;
    Ok(())
}

/// Write default settings and a bundle template unless they already exist.
pub fn init(settings_path: Option<&Path>) -> anyhow::Result<()> {
    let path = match settings_path {
        Some(p) => p.to_path_buf(),
        None => Settings::default_config_path()?,
    };

    if path.exists() {
        println!("Settings already exist: {}", path.display());
    } else {
        Settings::create_default_config(&path)?;
        println!("Wrote settings: {}", path.display());
    }

    let settings = Settings::load(Some(&path))?;
    let bundle_path = settings.bundle_path(Some(&path))?;
    if bundle_path.exists() {
        println!("Bundle already exists: {}", bundle_path.display());
    } else {
        std::fs::write(&bundle_path, serde_json::to_string_pretty(&bundle_template())?)?;
        println!("Wrote bundle template: {}", bundle_path.display());
        println!("Fill in apiKey and proxyUrlPrefix before running");
    }

    Ok(())
}

fn bundle_template() -> ConfigBundle {
    ConfigBundle {
        endpoint_url: "https://api.openai.com/v1/chat/completions".to_string(),
        api_key: String::new(),
        model_name: "gpt-4o-mini".to_string(),
        system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        proxy_url_prefix: String::new(),
        provider: Provider::ChatCompletions,
    }
}

fn print_report(report: &RunReport) {
    let elapsed = report
        .finished_at
        .map(|end| (end - report.started_at).num_seconds())
        .unwrap_or_default();

    println!(
        "Run complete: {} summarized, {} failed, {} skipped, {} batches, {} cooldowns ({}s)",
        report.summarized,
        report.failed,
        report.skipped,
        report.batches.len(),
        report.cooldowns,
        elapsed
    );
}
