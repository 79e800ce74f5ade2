use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub places_api_key: String,
    pub places_base_url: String,
    /// Language code forwarded to the details call so reviews come back translated.
    pub review_language: Option<String>,
    pub classifier_url: String,
    /// Model id the inference server is expected to report from `/info`.
    pub classifier_model: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub classify_concurrency: usize,
    pub analysis_timeout_secs: u64,
    pub sample_size: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("places_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("review_language", &self.review_language)
            .field("classifier_url", &self.classifier_url)
            .field("classifier_model", &self.classifier_model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("classify_concurrency", &self.classify_concurrency)
            .field("analysis_timeout_secs", &self.analysis_timeout_secs)
            .field("sample_size", &self.sample_size)
            .finish()
    }
}

/// Subset of [`AppConfig`] for talking to the inference server alone.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub log_level: String,
    pub classifier_url: String,
    pub classifier_model: String,
    pub request_timeout_secs: u64,
}
