//! Prompt Builder: turns a `DisclosureRequest` into the system and user prompts.
//!
//! User-supplied fields are embedded verbatim; nothing is escaped.

use crate::models::disclosure::{DisclosureRequest, Metric, Tone};

/// System prompt for disclosure drafting. Frameworks are named as familiar
/// context for the model, not as constraints on the output.
pub const DISCLOSURE_SYSTEM: &str = "You are an ESG reporting assistant. \
    You help sustainability teams draft disclosure-ready ESG narrative \
    based on structured ESG metrics and frameworks such as CSRD, SASB, GRI, and CDP.\n\n\
    Use clear business English, avoid greenwashing, and be specific and realistic.";

/// Heading the model is asked to emit; the interpreter splits on it.
pub const SUGGESTIONS_MARKER: &str = "Suggestions for Improvement";

const NO_FRAMEWORKS: &str = "general ESG best practices";
const NO_METRICS: &str = "- No metrics provided.";

const REGULATORY_TONE: &str = "Write in a formal, compliance-oriented tone appropriate for a \
    sustainability report or regulatory filing.";

const INVESTOR_TONE: &str = "Write in a concise, investor-friendly tone focusing on financial \
    relevance, strategy, and risk management.";

/// Builds `(system_prompt, user_prompt)` for a disclosure request.
pub fn build_prompts(request: &DisclosureRequest) -> (String, String) {
    (DISCLOSURE_SYSTEM.to_string(), build_user_prompt(request))
}

fn build_user_prompt(request: &DisclosureRequest) -> String {
    format!(
        r#"Company: {company}
Sector: {sector}
Year: {year}
Frameworks to keep in mind: {frameworks}

Key metrics:
{metrics}

Initiatives and highlights (internal notes from the sustainability team):
{initiatives}

Task:
1. Draft a 2–3 paragraph ESG disclosure section that could be used in a sustainability/ESG report.
2. Where appropriate, mention alignment with the specified frameworks in plain language (no legal boilerplate).
3. Be realistic and avoid over-claiming or promotional language.

{tone}

After the disclosure, add a short section titled "{marker}"
with 3–5 bullet points describing how the disclosure or underlying performance could improve.
"#,
        company = request.company_name,
        sector = request.sector,
        year = request.year,
        frameworks = render_frameworks(request),
        metrics = render_metrics(&request.metrics),
        initiatives = request.initiatives,
        tone = tone_instruction(request.tone),
        marker = SUGGESTIONS_MARKER,
    )
}

/// Comma-joined framework names, or a generic phrase when none were chosen.
pub fn render_frameworks(request: &DisclosureRequest) -> String {
    if request.frameworks.is_empty() {
        return NO_FRAMEWORKS.to_string();
    }
    request
        .frameworks
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One `- name: value[ unit]` line per metric.
pub fn render_metrics(metrics: &[Metric]) -> String {
    if metrics.is_empty() {
        return NO_METRICS.to_string();
    }
    metrics.iter().map(render_metric).collect::<Vec<_>>().join("\n")
}

fn render_metric(metric: &Metric) -> String {
    match metric.unit.as_deref().filter(|u| !u.is_empty()) {
        Some(unit) => format!("- {}: {} {}", metric.name, metric.value, unit),
        None => format!("- {}: {}", metric.name, metric.value),
    }
}

/// Regulatory gets the formal register; every other tone falls through to
/// the investor-oriented one.
pub fn tone_instruction(tone: Tone) -> &'static str {
    if tone.is_regulatory() {
        REGULATORY_TONE
    } else {
        INVESTOR_TONE
    }
}
