use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the remote recipe catalog
    #[serde(default = "default_catalog_api_url")]
    pub catalog_api_url: String,

    /// Redis connection URL for the durable key-value backing
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
}

fn default_catalog_api_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed("RECIPELAB_")
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
