//! Remote edit client — one surgical-edit call to the generative backend.
//!
//! DESIGN
//! ======
//! Wraps the user's base text and instruction in a fixed instructional
//! template and asks the model for a minimal substitution at low
//! temperature. Input validation is the session controller's job, not this
//! layer's. Every provider failure is normalized to one user-safe error;
//! the underlying cause is logged, never shown.

use std::sync::Arc;

use tracing::{error, info};

use crate::llm::GenerateText;
use crate::llm::types::GenerationParams;

/// Returned in place of an empty-but-successful model response. Deliberately
/// a success value, not an error: the service answered, it just produced no
/// text.
pub const FALLBACK_TEXT: &str = "no edited text could be produced";

// Low temperature: fidelity to the source text over creative drift.
const REFINE_TEMPERATURE: f32 = 0.1;
const REFINE_MAX_OUTPUT_TOKENS: u32 = 8192;

const SYSTEM_INSTRUCTION: &str = "\
You are a professional prompt-engineering specialist.
Your task is to modify a given base text according to a specific edit instruction.

CRITICAL RULES:
1. SURGICAL EDITS: change only the exact sentences, words, or concepts named by the instruction.
2. PRESERVE CONTEXT: leave the rest of the text EXACTLY as it is. Do not rephrase, improve, or shorten parts that were not asked to change.
3. NO META TALK: return only the final modified text. Do not add explanations like \"here is your modified text\" or \"I changed these parts\".
4. LANGUAGE AND REGISTER: if the base text is in another language, continue in that language. If it is formal, stay formal; if it is creative, stay creative.
5. PRECISION: change ONLY the few words or sentences the instruction targets; do not disturb the overall structure.";

// =============================================================================
// TYPES
// =============================================================================

/// A single edit request. Transient: constructed per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefineRequest {
    pub base_prompt: String,
    pub instruction: String,
}

/// Normalized failure of the remote edit call. The Display text is the
/// user-facing message, independent of the underlying cause.
#[derive(Debug, thiserror::Error)]
#[error("The edit service request failed. Check your connection and try again.")]
pub struct EditServiceError;

// =============================================================================
// REFINE
// =============================================================================

/// Run one surgical edit against the remote service.
///
/// On success the returned text is non-empty: an empty service response is
/// mapped to [`FALLBACK_TEXT`] rather than an error.
///
/// # Errors
///
/// Returns [`EditServiceError`] on any transport or service-side failure.
/// The specific cause is logged here and not preserved for the caller.
pub async fn refine(llm: &Arc<dyn GenerateText>, request: &RefineRequest) -> Result<String, EditServiceError> {
    let prompt = build_edit_prompt(&request.base_prompt, &request.instruction);
    let params = GenerationParams {
        temperature: REFINE_TEMPERATURE,
        max_output_tokens: REFINE_MAX_OUTPUT_TOKENS,
    };

    match llm.generate(SYSTEM_INSTRUCTION, &prompt, params).await {
        Ok(response) => {
            info!(
                model = %response.model,
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                chars = response.text.len(),
                "refine: edit complete"
            );
            if response.text.is_empty() {
                Ok(FALLBACK_TEXT.to_string())
            } else {
                Ok(response.text)
            }
        }
        Err(e) => {
            error!(error = %e, "refine: edit call failed");
            Err(EditServiceError)
        }
    }
}

/// Embed base text and instruction verbatim in the edit template.
pub(crate) fn build_edit_prompt(base_prompt: &str, instruction: &str) -> String {
    format!(
        "BASE TEXT:\n\"\"\"\n{base_prompt}\n\"\"\"\n\n\
         EDIT INSTRUCTION:\n\"\"\"\n{instruction}\n\"\"\"\n\n\
         MODIFIED TEXT:"
    )
}

#[cfg(test)]
#[path = "refine_test.rs"]
mod tests;
