//! Response Interpreter: splits raw model output into disclosure body,
//! improvement suggestions and a normalized usage record.
//!
//! Never fails: a missing marker or missing bullets just yields an empty
//! suggestion list.

use tracing::info;

use crate::disclosure::prompts::SUGGESTIONS_MARKER;
use crate::llm_client::TokenUsage;
use crate::models::disclosure::{GeneratedDisclosure, UsageRecord};

const BULLET_MARKERS: [char; 3] = ['-', '•', '*'];

/// Every character treated as a line boundary in model output, including
/// bare `\r`, form feeds and the Unicode line/paragraph separators.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

pub fn interpret(
    raw_text: &str,
    provider_model: Option<&str>,
    provider_usage: Option<&TokenUsage>,
    fallback_model: &str,
) -> GeneratedDisclosure {
    let (disclosure_text, suggestions_block) = match raw_text.split_once(SUGGESTIONS_MARKER) {
        Some((before, after)) => (before.trim(), after),
        None => (raw_text.trim(), ""),
    };

    let suggestions = parse_suggestions(suggestions_block);
    let usage = build_usage(provider_model, provider_usage, fallback_model);

    info!(
        "LLM usage: model={}, prompt_tokens={}, completion_tokens={}, total_tokens={}",
        usage.model_name,
        display_count(usage.prompt_tokens),
        display_count(usage.completion_tokens),
        display_count(usage.total_tokens)
    );

    GeneratedDisclosure {
        disclosure_text: disclosure_text.to_string(),
        suggestions,
        usage,
    }
}

/// Keeps only bullet lines. Leading runs of bullet characters and spaces are
/// stripped, so `"- * item"` becomes `"item"`. A bare `"-"` yields `""`.
fn parse_suggestions(block: &str) -> Vec<String> {
    // Empty pieces between "\r\n" pairs are not bullets and drop out below.
    block
        .split(LINE_BREAKS)
        .map(str::trim)
        .filter(|line| line.starts_with(BULLET_MARKERS))
        .map(|line| {
            line.trim_start_matches(|c: char| BULLET_MARKERS.contains(&c) || c == ' ')
                .trim()
                .to_string()
        })
        .collect()
}

fn display_count(count: Option<u32>) -> String {
    count.map_or_else(|| "None".to_string(), |n| n.to_string())
}

fn build_usage(
    provider_model: Option<&str>,
    provider_usage: Option<&TokenUsage>,
    fallback_model: &str,
) -> UsageRecord {
    let usage = provider_usage.cloned().unwrap_or_default();
    UsageRecord {
        model_name: provider_model.unwrap_or(fallback_model).to_string(),
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
        total_tokens: usage.total_tokens,
    }
}
