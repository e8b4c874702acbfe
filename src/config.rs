use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Load the bundled clothing catalog and outfits at startup
    #[serde(default = "default_seed_catalog")]
    pub seed_catalog: bool,

    /// Shopify admin API base URL used by the external product import
    #[serde(default = "default_shopify_api_url")]
    pub shopify_api_url: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_seed_catalog() -> bool {
    true
}

fn default_shopify_api_url() -> String {
    "https://api.shopify.com/admin/api/2023-07".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
