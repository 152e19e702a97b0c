use std::env;

#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl StorefrontConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let base_url = env::var("SHRIX_API_URL")?;
        let token = env::var("SHRIX_API_TOKEN").ok().filter(|t| !t.is_empty());
        let timeout_secs = env::var("SHRIX_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());
        Ok(Self {
            base_url,
            token,
            timeout_secs,
        })
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout_secs: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}
