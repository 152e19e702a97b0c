use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication required")]
    AuthRequired,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not Found")]
    NotFound,

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Request failed")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response body")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error")]
    Config(#[from] anyhow::Error),
}

impl ApiError {
    /// The message an operator-facing surface should display. Server
    /// rejections come through verbatim.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Login redirect target for an `AuthRequired` failure, carrying the page to
/// return to after sign-in.
pub fn login_path(return_to: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(return_to.as_bytes()).collect();
    format!("/login?redirect={encoded}")
}
