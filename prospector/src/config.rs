use std::env;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Process settings. The OpenAI key is never read from here; it comes with
/// every request.
#[derive(Debug, Clone)]
pub struct ProspectorConfig {
    pub openai_base_url: String,
    pub openai_model: String,
    pub bind_addr: String,
}

impl ProspectorConfig {
    pub fn from_env() -> Self {
        Self {
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            openai_model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            bind_addr: env_or("PROSPECTOR_BIND_ADDR", DEFAULT_BIND_ADDR),
        }
    }
}

impl Default for ProspectorConfig {
    fn default() -> Self {
        Self {
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProspectorConfig::default();

        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_env_or_falls_back_on_missing_or_blank() {
        assert_eq!(env_or("PROSPECTOR_TEST_SURELY_UNSET_VAR", "fallback"), "fallback");
    }
}
