use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// JSON file holding registered users and their ratings
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Result cap offered by the recommendation prompt
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Tracing filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("movies_data.json")
}

fn default_max_results() -> usize {
    10
}

fn default_log_filter() -> String {
    "cinematch=info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            max_results: default_max_results(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
