use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    /// Seed the demo admin account at startup.
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = var("VOXO_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("VOXO_JWT_SECRET is unset or still a placeholder; it must match the identity provider's signing secret");
        }

        let db_path = var("VOXO_DB_PATH").unwrap_or_else(|| "voxo.db".into()).into();
        let host = var("VOXO_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = var("VOXO_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("VOXO_PORT is not a port number")?;
        let addr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", host, port))?;
        let seed_demo = var("VOXO_SEED_DEMO").is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        Ok(Self {
            jwt_secret,
            db_path,
            addr,
            seed_demo,
        })
    }
}
