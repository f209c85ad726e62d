use std::time::Duration;

use crate::error::{Result, SeedError};

/// Tunables for one LLM seeding run.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Model identifier passed through to the API.
    pub model: String,
    /// Hard cap per (country, category) unit. Prompt logic prevents
    /// overlisting small countries; this bounds the schema as well.
    pub max_items: usize,
    /// Sampling temperature. Lower is more deterministic; best quality is
    /// usually 0.0-0.2.
    pub temperature: f32,
    /// Pause between API calls.
    pub sleep: Duration,
    /// Run a second-pass verifier per returned item (best accuracy, more
    /// calls).
    pub verify: bool,
    /// Skip anything already present in the manually curated list.
    pub dedupe_against_manual: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            model: "gpt-5.2".to_string(),
            max_items: 5,
            temperature: 0.1,
            sleep: Duration::from_millis(500),
            verify: false,
            dedupe_against_manual: false,
        }
    }
}

/// Resolves the API credential: environment variable first, then the
/// injected prompt. An empty result from both is fatal.
///
/// The prompt is a callback so callers without a terminal (and tests) can
/// supply their own source.
pub fn resolve_api_key<F>(env_var: &str, prompt: F) -> Result<String>
where
    F: FnOnce() -> std::io::Result<String>,
{
    if let Ok(key) = std::env::var(env_var) {
        let key = key.trim();
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }

    let key = prompt()?.trim().to_string();
    if key.is_empty() {
        return Err(SeedError::MissingCredential);
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_wins_over_prompt() {
        std::env::set_var("SEED_TEST_KEY_SET", "from-env");
        let key = resolve_api_key("SEED_TEST_KEY_SET", || {
            panic!("prompt must not run when the env var is set")
        })
        .unwrap();
        assert_eq!(key, "from-env");
        std::env::remove_var("SEED_TEST_KEY_SET");
    }

    #[test]
    fn test_prompt_fallback() {
        std::env::remove_var("SEED_TEST_KEY_UNSET");
        let key =
            resolve_api_key("SEED_TEST_KEY_UNSET", || Ok("  typed-in \n".to_string())).unwrap();
        assert_eq!(key, "typed-in");
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        std::env::remove_var("SEED_TEST_KEY_EMPTY");
        let err = resolve_api_key("SEED_TEST_KEY_EMPTY", || Ok("   ".to_string())).unwrap_err();
        assert!(matches!(err, SeedError::MissingCredential));
    }

    #[test]
    fn test_blank_env_var_falls_through_to_prompt() {
        std::env::set_var("SEED_TEST_KEY_BLANK", "  ");
        let key = resolve_api_key("SEED_TEST_KEY_BLANK", || Ok("prompted".to_string())).unwrap();
        assert_eq!(key, "prompted");
        std::env::remove_var("SEED_TEST_KEY_BLANK");
    }

    #[test]
    fn test_default_options() {
        let options = GeneratorOptions::default();
        assert_eq!(options.model, "gpt-5.2");
        assert_eq!(options.max_items, 5);
        assert!(!options.verify);
        assert!(!options.dedupe_against_manual);
    }
}
