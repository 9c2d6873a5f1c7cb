use thiserror::Error;

#[derive(Error, Debug)]
pub enum RadarError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("upstream error ({status}): {detail}")]
    Upstream { status: u16, detail: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("data error: {0}")]
    Data(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl RadarError {
    /// True for errors the user caused and can fix by changing input.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, RadarError>;
