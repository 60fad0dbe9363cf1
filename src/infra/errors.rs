// src/infra/errors.rs — Error types for autocoder

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoCoderError {
    // Model invocation failures (iteration is skipped, loop continues)
    #[error("Provider '{provider}' error: {message}")]
    Provider {
        provider: String,
        message: String,
        retriable: bool,
    },

    #[error("Provider '{provider}' returned a malformed response: {message}")]
    MalformedResponse { provider: String, message: String },

    // Startup errors (fatal)
    #[error("No API key found. Set {var} in the environment.")]
    MissingApiKey { var: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AutoCoderError {
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            AutoCoderError::Provider {
                retriable: true,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_provider_error() {
        let e = AutoCoderError::Provider {
            provider: "openrouter".into(),
            message: "timed out".into(),
            retriable: true,
        };
        assert!(e.is_retriable());
    }

    #[test]
    fn test_malformed_response_not_retriable() {
        let e = AutoCoderError::MalformedResponse {
            provider: "openai".into(),
            message: "missing choices".into(),
        };
        assert!(!e.is_retriable());
        assert!(e.to_string().contains("malformed"));
    }

    #[test]
    fn test_missing_key_message_names_variable() {
        let e = AutoCoderError::MissingApiKey {
            var: "OPENROUTER_API_KEY".into(),
        };
        assert!(e.to_string().contains("OPENROUTER_API_KEY"));
    }
}
