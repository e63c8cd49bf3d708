use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{ApiKey, ProviderConfig, ProviderKind};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Application configuration loaded from environment variables.
/// Startup fails if the selected provider's credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let kind = match get("LLM_PROVIDER") {
            Some(value) => value.parse::<ProviderKind>()?,
            None => ProviderKind::Chat,
        };

        let credential_env = kind.credential_env();
        let api_key = get(credential_env).with_context(|| {
            format!("Required environment variable '{credential_env}' is not set")
        })?;

        let timeout_secs = match get("LLM_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            provider: ProviderConfig {
                kind,
                api_key: ApiKey::new(api_key),
                base_url: get("LLM_BASE_URL")
                    .unwrap_or_else(|| kind.default_base_url().to_string()),
                model: get("LLM_MODEL").unwrap_or_else(|| kind.default_model().to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_to_chat_provider() {
        let config = load(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Chat);
        assert_eq!(config.provider.model, "gpt-4o-mini");
        assert_eq!(config.provider.base_url, "https://api.openai.com");
        assert_eq!(config.provider.timeout, Duration::from_secs(60));
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_anthropic_provider_reads_its_own_key() {
        let config = load(&[
            ("LLM_PROVIDER", "anthropic"),
            ("ANTHROPIC_API_KEY", "ant-key"),
        ])
        .unwrap();
        assert_eq!(config.provider.kind, ProviderKind::SingleMessage);
        assert_eq!(config.provider.api_key.expose(), "ant-key");
        assert_eq!(config.provider.base_url, "https://api.anthropic.com");
    }

    #[test]
    fn test_missing_credential_names_the_variable() {
        let err = load(&[("LLM_PROVIDER", "anthropic"), ("OPENAI_API_KEY", "sk")]).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));

        let err = load(&[("OPENAI_API_KEY", "  ")]).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("LLM_MODEL", "gpt-4o"),
            ("LLM_BASE_URL", "http://localhost:11434"),
            ("LLM_TIMEOUT_SECS", "15"),
            ("PORT", "3000"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(config.provider.model, "gpt-4o");
        assert_eq!(config.provider.base_url, "http://localhost:11434");
        assert_eq!(config.provider.timeout, Duration::from_secs(15));
        assert_eq!(config.port, 3000);
        assert_eq!(config.rust_log, "debug");
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        assert!(load(&[("OPENAI_API_KEY", "sk"), ("PORT", "http")]).is_err());
        assert!(load(&[("OPENAI_API_KEY", "sk"), ("LLM_TIMEOUT_SECS", "-1")]).is_err());
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        assert!(load(&[("LLM_PROVIDER", "gemini"), ("OPENAI_API_KEY", "sk")]).is_err());
    }

    #[test]
    fn test_debug_output_hides_credential() {
        let config = load(&[("OPENAI_API_KEY", "sk-super-secret")]).unwrap();
        assert!(!format!("{config:?}").contains("sk-super-secret"));
    }
}
