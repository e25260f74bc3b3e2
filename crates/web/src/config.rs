use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub official_api_keys: String,
    pub athlete_api_keys: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            official_api_keys: std::env::var("OFFICIAL_API_KEYS").unwrap_or_default(),
            athlete_api_keys: std::env::var("ATHLETE_API_KEYS").unwrap_or_default(),
        })
    }
}
