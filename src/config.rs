use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/bigcode/starcoder";

#[derive(Clone, Debug)]
pub struct Config {
    pub inference_url: String,
    /// Sent verbatim as the bearer token. An empty value is not rejected
    /// here; the upstream answers with an authorization failure instead.
    pub inference_token: String,
    pub inference_timeout: Duration,
    pub inference_max_retries: u32,
    pub database_path: PathBuf,
    pub max_upload_bytes: usize,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            inference_token: String::new(),
            inference_timeout: Duration::from_secs(60),
            inference_max_retries: 1,
            database_path: PathBuf::from("reviews.db"),
            max_upload_bytes: 2 * 1024 * 1024,
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let inference_url =
            std::env::var("INFERENCE_URL").unwrap_or(defaults.inference_url);
        let inference_token = std::env::var("HUGGINGFACE_TOKEN").unwrap_or_default();

        let inference_timeout = env_parsed("INFERENCE_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.inference_timeout);
        let inference_max_retries =
            env_parsed("INFERENCE_MAX_RETRIES").unwrap_or(defaults.inference_max_retries);

        let database_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);
        let max_upload_bytes =
            env_parsed("MAX_UPLOAD_BYTES").unwrap_or(defaults.max_upload_bytes);

        let host = std::env::var("HOST").unwrap_or(defaults.host);
        let port = env_parsed("PORT").unwrap_or(defaults.port);

        Ok(Self {
            inference_url,
            inference_token,
            inference_timeout,
            inference_max_retries,
            database_path,
            max_upload_bytes,
            host,
            port,
        })
    }
}

/// Reads and parses a variable, treating unset or malformed values as absent.
fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let config = Config::default();
        assert_eq!(config.inference_url, DEFAULT_INFERENCE_URL);
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.inference_max_retries, 1);
        assert_eq!(config.database_path, PathBuf::from("reviews.db"));
    }

    #[test]
    fn malformed_numbers_are_ignored() {
        std::env::set_var("CODE_REVIEW_TEST_NUMBER", "not-a-number");
        assert_eq!(env_parsed::<u16>("CODE_REVIEW_TEST_NUMBER"), None);
        std::env::set_var("CODE_REVIEW_TEST_NUMBER", " 42 ");
        assert_eq!(env_parsed::<u16>("CODE_REVIEW_TEST_NUMBER"), Some(42));
        std::env::remove_var("CODE_REVIEW_TEST_NUMBER");
    }
}
