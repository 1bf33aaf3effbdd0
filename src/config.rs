use std::env;

use anyhow::{Context, Result};

pub struct Config {
    pub port: u16,
    pub public_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;
        let public_dir = env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string());

        Ok(Self { port, public_dir })
    }
}
