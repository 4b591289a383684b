use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let db_path = get("GRADEBOOK_DB_PATH", "./db.sqlite");
        let bind_addr = get("GRADEBOOK_BIND_ADDR", "0.0.0.0:8000");
        let static_dir = get("GRADEBOOK_STATIC_DIR", "./dist");

        if db_path.trim().is_empty() {
            bail!("GRADEBOOK_DB_PATH must not be empty");
        }
        if static_dir.trim().is_empty() {
            bail!("GRADEBOOK_STATIC_DIR must not be empty");
        }
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("GRADEBOOK_BIND_ADDR is not a socket address: {bind_addr}"))?;

        Ok(Self {
            db_path: PathBuf::from(db_path),
            bind_addr,
            static_dir: PathBuf::from(static_dir),
        })
    }
}
