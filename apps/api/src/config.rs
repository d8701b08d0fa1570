use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const DEFAULT_PACKAGE_SIZES: &str = "250,500,1000,2000";
pub const DEFAULT_MAX_QUANTITY: i64 = 1_000_000;
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/web/static");

/// Application configuration loaded from environment variables.
/// Every variable has a default; empty values count as unset.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Raw package sizes as configured. The catalog validates and sorts them.
    pub package_sizes: Vec<i64>,
    /// Largest quantity accepted by `/api/calculate`. The solver's table grows
    /// linearly with the quantity, so this bounds per-request memory.
    pub max_quantity: i64,
    pub static_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let package_sizes = parse_package_sizes(&env_or("PACKAGE_SIZES", DEFAULT_PACKAGE_SIZES))
            .context("invalid PACKAGE_SIZES")?;

        let max_quantity = env_or("MAX_QUANTITY", &DEFAULT_MAX_QUANTITY.to_string())
            .parse::<i64>()
            .context("MAX_QUANTITY must be an integer")?;
        if max_quantity <= 0 {
            bail!("MAX_QUANTITY must be positive, got {max_quantity}");
        }

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            package_sizes,
            max_quantity,
            static_dir: PathBuf::from(env_or("STATIC_DIR", DEFAULT_STATIC_DIR)),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parses a comma-separated list such as `"250, 500,,1000"`.
///
/// Whitespace is trimmed and empty segments are skipped. Fails on a
/// non-integer or non-positive segment, or when nothing is left.
pub fn parse_package_sizes(raw: &str) -> Result<Vec<i64>> {
    if raw.is_empty() {
        bail!("package sizes cannot be empty");
    }

    let mut sizes = Vec::new();
    for segment in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let size = segment
            .parse::<i64>()
            .with_context(|| format!("invalid package size '{segment}'"))?;
        if size <= 0 {
            bail!("package size must be positive, got {size}");
        }
        sizes.push(size);
    }

    if sizes.is_empty() {
        bail!("no valid package sizes found");
    }
    Ok(sizes)
}
