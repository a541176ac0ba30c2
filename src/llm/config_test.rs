use super::*;
use std::sync::{Mutex, MutexGuard};

// Env vars are process-global; serialize the tests that touch them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn clear_llm_env() {
    unsafe {
        std::env::remove_var("LLM_PROVIDER");
        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_API_KEY");
        std::env::remove_var("LLM_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("LLM_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults_to_gemini() {
    let _guard = env_guard();
    clear_llm_env();
    unsafe { std::env::set_var("LLM_API_KEY", "secret") };

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::Gemini);
    assert_eq!(cfg.model, "gemini-3-flash-preview");
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(
        cfg.timeouts,
        LlmTimeouts { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    );

    clear_llm_env();
}

#[test]
fn from_env_parses_overrides() {
    let _guard = env_guard();
    clear_llm_env();
    unsafe {
        std::env::set_var("LLM_PROVIDER", "anthropic");
        std::env::set_var("LLM_API_KEY", "sk-test");
        std::env::set_var("LLM_MODEL", "claude-test-model");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("LLM_CONNECT_TIMEOUT_SECS", "7");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::Anthropic);
    assert_eq!(cfg.model, "claude-test-model");
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });

    clear_llm_env();
}

#[test]
fn from_env_missing_api_key_errors() {
    let _guard = env_guard();
    clear_llm_env();

    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "LLM_API_KEY"));

    clear_llm_env();
}

#[test]
fn from_env_unknown_provider_errors() {
    let _guard = env_guard();
    clear_llm_env();
    unsafe {
        std::env::set_var("LLM_PROVIDER", "bad");
        std::env::set_var("LLM_API_KEY", "secret");
    }

    let err = LlmConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("unknown LLM_PROVIDER"));

    clear_llm_env();
}

#[test]
fn provider_defaults() {
    assert_eq!(parse_provider(None).unwrap(), LlmProviderKind::Gemini);
    assert_eq!(parse_provider(Some("anthropic")).unwrap(), LlmProviderKind::Anthropic);
    assert_eq!(default_model(LlmProviderKind::Gemini), "gemini-3-flash-preview");
}
