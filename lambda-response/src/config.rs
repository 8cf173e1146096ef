use crate::aws::lambda_events::response::Headers;
use crate::utils::env::get_env;

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Service name reported in traces when `SERVICE_NAME` is unset
pub const DEFAULT_SERVICE_NAME: &str = env!("CARGO_PKG_NAME");

/// Centralized response configuration for Lambda functions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseConfig {
    /// Content-Type attached to every response
    pub content_type: String,
    /// Value of Access-Control-Allow-Origin, if CORS is enabled
    pub cors_allow_origin: Option<String>,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            cors_allow_origin: None,
        }
    }
}

impl ResponseConfig {
    pub fn new(content_type: String, cors_allow_origin: Option<String>) -> Self {
        Self {
            content_type,
            cors_allow_origin,
        }
    }

    /// Get configuration from environment variables
    pub fn from_env() -> Self {
        let cors_allow_origin = std::env::var("CORS_ALLOW_ORIGIN")
            .ok()
            .filter(|origin| !origin.is_empty());

        Self {
            content_type: get_env("RESPONSE_CONTENT_TYPE", DEFAULT_CONTENT_TYPE),
            cors_allow_origin,
        }
    }

    pub fn default_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), self.content_type.clone());
        if let Some(origin) = &self.cors_allow_origin {
            headers.insert("Access-Control-Allow-Origin".to_string(), origin.clone());
        }
        headers
    }
}

/// Global configuration instance
pub fn get_config() -> &'static ResponseConfig {
    static CONFIG: once_cell::sync::Lazy<ResponseConfig> =
        once_cell::sync::Lazy::new(ResponseConfig::from_env);
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = ResponseConfig::default();

        assert_eq!(config.content_type, "application/json");
        assert_eq!(config.cors_allow_origin, None);
    }

    #[test]
    fn test_default_headers() {
        let config = ResponseConfig::new("text/plain".to_string(), Some("*".to_string()));
        let headers = config.default_headers();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Content-Type").unwrap(), "text/plain");
        assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");

        let headers = ResponseConfig::default().default_headers();
        assert_eq!(headers.len(), 1);
    }

    // Env-mutating cases share one test so they cannot race each other.
    #[test]
    fn test_from_env() {
        env::remove_var("RESPONSE_CONTENT_TYPE");
        env::remove_var("CORS_ALLOW_ORIGIN");
        assert_eq!(ResponseConfig::from_env(), ResponseConfig::default());

        env::set_var("RESPONSE_CONTENT_TYPE", "text/html");
        env::set_var("CORS_ALLOW_ORIGIN", "https://example.com");
        let config = ResponseConfig::from_env();
        assert_eq!(config.content_type, "text/html");
        assert_eq!(
            config.cors_allow_origin.as_deref(),
            Some("https://example.com")
        );

        env::set_var("CORS_ALLOW_ORIGIN", "");
        assert_eq!(ResponseConfig::from_env().cors_allow_origin, None);

        // Clean up environment variables
        env::remove_var("RESPONSE_CONTENT_TYPE");
        env::remove_var("CORS_ALLOW_ORIGIN");
    }

    #[test]
    fn test_get_config() {
        let config = get_config();
        assert!(!config.content_type.is_empty());
    }
}
