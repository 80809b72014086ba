//! Popup panel rendered as plain text.

use std::fmt::Write;

use brandlens_protocols::types::{AnalysisResult, BrandAnalysis};

/// Cells in a full tone bar.
pub const BAR_WIDTH: usize = 20;

const FILLED: char = '█';
const EMPTY: char = '░';

/// What the popup is showing.
#[derive(Debug, Clone)]
pub enum PopupState {
    Analyzing,
    NoContent,
    Error(String),
    Ready(AnalysisResult),
}

pub fn render(state: &PopupState) -> String {
    match state {
        PopupState::Analyzing => "Analyzing page…\n".to_string(),
        PopupState::NoContent => "No readable content found on this page.\n".to_string(),
        PopupState::Error(message) => format!("Analysis failed\n\n{}\n", message.trim()),
        PopupState::Ready(result) => render_report(result),
    }
}

/// A score of 0..=100 as a bar of [`BAR_WIDTH`] cells, rounded to the nearest cell.
pub fn tone_bar(score: u8) -> String {
    let score = usize::from(score.min(100));
    let filled = (score * BAR_WIDTH + 50) / 100;
    let mut bar = String::with_capacity(BAR_WIDTH * 3);
    bar.extend(std::iter::repeat_n(FILLED, filled));
    bar.extend(std::iter::repeat_n(EMPTY, BAR_WIDTH - filled));
    bar
}

pub fn render_report(result: &AnalysisResult) -> String {
    let brand = result.brand();
    let mut out = String::new();

    let _ = writeln!(out, "Brand analysis");
    let _ = writeln!(out, "{}", "=".repeat(40));

    if brand.is_empty() {
        let raw = serde_json::to_string_pretty(&result.analysis).unwrap_or_default();
        let _ = writeln!(out, "The reply had no recognized fields:\n{}", raw);
    } else {
        write_brand(&mut out, &brand);
    }

    let _ = writeln!(out);
    let _ = write!(
        out,
        "{} · {}",
        result.model,
        result.analyzed_at.format("%Y-%m-%d %H:%M UTC")
    );
    if result.cached {
        out.push_str(" (cached)");
    }
    out.push('\n');
    out
}

fn write_brand(out: &mut String, brand: &BrandAnalysis) {
    if let Some(archetype) = &brand.archetype {
        let _ = write!(out, "Archetype: {}", archetype.primary);
        let mut extra = Vec::new();
        if let Some(secondary) = &archetype.secondary {
            extra.push(format!("secondary: {}", secondary));
        }
        if let Some(confidence) = archetype.confidence {
            extra.push(format!("confidence {}%", confidence));
        }
        if !extra.is_empty() {
            let _ = write!(out, " ({})", extra.join(", "));
        }
        out.push('\n');
    }

    if !brand.tone_scores.is_empty() {
        let width = brand.tone_scores.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        let _ = writeln!(out, "\nTone");
        for (name, score) in &brand.tone_scores {
            let _ = writeln!(out, "  {:<width$}  {} {:>3}", name, tone_bar(*score), score);
        }
    }

    if !brand.summary.is_empty() {
        let _ = writeln!(out, "\nSummary\n  {}", brand.summary);
    }
    if !brand.keywords.is_empty() {
        let _ = writeln!(out, "\nKeywords: {}", brand.keywords.join(", "));
    }
    write_list(out, "Strengths", &brand.strengths);
    write_list(out, "Recommendations", &brand.recommendations);
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", title);
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

#[cfg(test)]
#[path = "popup_tests.rs"]
mod tests;
