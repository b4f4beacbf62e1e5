//! Disclosure generation: orchestrates a single request end to end.
//!
//! Flow: check provider → build prompts → one completion call → interpret →
//!       record history entry → return flattened response.
//!
//! The provider call happens before the history lock is taken, so a slow
//! generation never blocks `/api/history` or other requests.

use tracing::{error, info};

use crate::disclosure::history::HistoryStore;
use crate::disclosure::interpreter::interpret;
use crate::disclosure::prompts::build_prompts;
use crate::errors::AppError;
use crate::llm_client::CompletionProvider;
use crate::models::disclosure::{DisclosureRequest, GenerateDisclosureResponse};

/// Sampling temperature for disclosure drafting.
pub const GENERATION_TEMPERATURE: f32 = 0.4;

/// Returned verbatim to callers when no credential is configured.
pub const MISSING_KEY_MESSAGE: &str = "OPENAI_API_KEY is not set";

/// Runs the generation pipeline for one request.
///
/// Errors:
/// - `AppError::Configuration` when `llm` is `None` (no credential configured).
/// - `AppError::Generation` for any provider failure, including timeouts.
pub async fn generate_disclosure(
    llm: Option<&dyn CompletionProvider>,
    fallback_model: &str,
    history: &HistoryStore,
    request: &DisclosureRequest,
) -> Result<GenerateDisclosureResponse, AppError> {
    let llm = llm.ok_or_else(|| AppError::Configuration(MISSING_KEY_MESSAGE.to_string()))?;

    let (system_prompt, user_prompt) = build_prompts(request);

    info!(
        "Generating disclosure for {} ({}), tone={:?}",
        request.company_name, request.year, request.tone
    );

    let completion = llm
        .complete(&system_prompt, &user_prompt, GENERATION_TEMPERATURE)
        .await
        .map_err(|e| {
            error!("Disclosure generation failed for {}: {e}", request.company_name);
            AppError::Generation(e.to_string())
        })?;

    let generated = interpret(
        &completion.text,
        completion.model.as_deref(),
        completion.usage.as_ref(),
        fallback_model,
    );

    let entry = history.record(request, &generated.disclosure_text);
    info!(
        "Recorded history entry {} with {} suggestions",
        entry.id,
        generated.suggestions.len()
    );

    Ok(generated.into())
}
