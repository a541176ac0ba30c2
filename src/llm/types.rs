//! LLM types — provider-neutral generation types and errors.
//!
//! Shared by the Gemini and Anthropic clients. The surface is deliberately
//! small: one system instruction, one user prompt, one text response.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// GENERATION TYPES
// =============================================================================

/// Decoding controls for a single generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Response from a text-generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextResponse {
    /// Concatenated text output. May be empty when the model produced no
    /// text parts; interpreting that is the caller's business.
    pub text: String,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

// =============================================================================
// GENERATE TRAIT
// =============================================================================

/// Provider-neutral async trait for single-shot text generation. Enables
/// mocking in tests.
#[async_trait::async_trait]
pub trait GenerateText: Send + Sync {
    /// Send one system + user prompt pair to the provider.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response is
    /// malformed.
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<TextResponse, LlmError>;
}
