//! `analyze`, `extract` and `overlay` commands.

use std::path::Path;
use std::process::ExitCode;

use brandlens_core::{error_message, extraction_options};
use brandlens_extractor_html::ContentExtractor;
use brandlens_protocols::error::AnalyzerError;
use brandlens_protocols::message::Response;
use brandlens_protocols::types::{AnalysisResult, ExtractedContent};
use brandlens_ui::{PopupState, inject_overlay, render, render_panel, render_status_panel};
use tracing::info;

use crate::cli::{AnalyzeSource, PageSource};
use crate::context::AppContext;
use crate::page::{load_page, read_page};

const NO_CONTENT: &str = "No readable content found on this page.";

/// Analyze a page or text and print the popup report (or JSON).
pub(crate) async fn handle_analyze(
    ctx: &AppContext,
    source: AnalyzeSource,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let settings = ctx.settings()?;
    let timeout = settings.request_timeout_secs;
    let analyzer = ctx.analyzer(settings)?;

    let outcome = match source.text {
        Some(text) => analyzer.analyze(&text).await,
        None => {
            let page = load_page(source.url.as_deref(), source.file.as_deref(), timeout).await?;
            let content = analyzer.extract(&page.html, page.url.as_deref());
            info!(
                "Extracted {} chars, {} headlines, {} elements",
                content.char_count(),
                content.headlines.len(),
                content.elements.len()
            );
            analyzer.analyze_content(&content).await
        }
    };

    print_outcome(outcome, json)
}

fn print_outcome(
    outcome: Result<AnalysisResult, AnalyzerError>,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let code = if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    if json {
        let response = match outcome {
            Ok(result) => Response::ok(None, serde_json::to_value(result)?),
            Err(e) => Response::err(None, error_message(&e)),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        let state = match outcome {
            Ok(result) => PopupState::Ready(result),
            Err(AnalyzerError::EmptyContent) => PopupState::NoContent,
            Err(e) => PopupState::Error(error_message(&e)),
        };
        print!("{}", render(&state));
    }

    Ok(code)
}

/// Print what the extractor finds on a page.
pub(crate) async fn handle_extract(
    ctx: &AppContext,
    source: PageSource,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let settings = ctx.settings()?;
    let page = load_page(
        source.url.as_deref(),
        source.file.as_deref(),
        settings.request_timeout_secs,
    )
    .await?;
    let extractor = ContentExtractor::new(extraction_options(&settings));
    let content = extractor.extract(&page.html, page.url.as_deref());

    if json {
        println!("{}", serde_json::to_string_pretty(&content)?);
    } else {
        print!("{}", describe_content(&content));
    }

    Ok(if content.is_empty() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn describe_content(content: &ExtractedContent) -> String {
    if content.is_empty() {
        return format!("{}\n", NO_CONTENT);
    }

    let mut out = String::new();
    let field = |value: &str| if value.is_empty() { "-".to_string() } else { value.to_string() };
    out.push_str(&format!("Title:       {}\n", field(&content.title)));
    out.push_str(&format!("URL:         {}\n", field(content.url.as_deref().unwrap_or_default())));
    out.push_str(&format!("Description: {}\n", field(&content.description)));

    if !content.headlines.is_empty() {
        out.push_str("\nHeadlines:\n");
        for headline in &content.headlines {
            out.push_str(&format!("  - {}\n", headline));
        }
    }
    if !content.elements.is_empty() {
        out.push_str("\nCalls to action:\n");
        for element in &content.elements {
            out.push_str(&format!("  - [{}] {}\n", element.tag, element.text));
        }
    }

    out.push_str(&format!("\nMain text ({} chars):\n", content.char_count()));
    out.push_str(&content.main_text);
    out.push('\n');
    out
}

/// Analyze a saved page and write a copy with the overlay panel injected.
/// Failures are written into the panel too.
pub(crate) async fn handle_overlay(
    ctx: &AppContext,
    file: &Path,
    url: Option<&str>,
    output: &Path,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let settings = ctx.settings()?;
    let analyzer = ctx.analyzer(settings.clone())?;
    let page = read_page(file, url)?;
    let content = analyzer.extract(&page.html, page.url.as_deref());

    let (panel, code) = match analyzer.analyze_content(&content).await {
        Ok(result) => (render_panel(&result, &settings), ExitCode::SUCCESS),
        Err(AnalyzerError::EmptyContent) => {
            (render_status_panel(NO_CONTENT, &settings), ExitCode::FAILURE)
        }
        Err(e) => {
            let message = format!("Analysis failed: {}", error_message(&e));
            eprintln!("{}", message);
            (render_status_panel(&message, &settings), ExitCode::FAILURE)
        }
    };

    std::fs::write(output, inject_overlay(&page.html, &panel))
        .map_err(|e| format!("Cannot write {}: {}", output.display(), e))?;
    println!("Wrote {}", output.display());

    Ok(code)
}
