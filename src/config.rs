use crate::console::controller::{DEFAULT_PAGE_SIZE, PAGE_SIZES};

/// Console settings, loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Default listing page size. Must be one of `PAGE_SIZES`.
    pub page_size: u32,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let base_url = std::env::var("TOKPOOL_BASE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000".into());
    if let Err(e) = url::Url::parse(&base_url) {
        anyhow::bail!("TOKPOOL_BASE_URL is not a valid URL: {e}");
    }

    let page_size = std::env::var("TOKPOOL_PAGE_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE);
    if !PAGE_SIZES.contains(&page_size) {
        anyhow::bail!("TOKPOOL_PAGE_SIZE must be one of {PAGE_SIZES:?}");
    }

    Ok(Config {
        base_url,
        timeout_secs: std::env::var("TOKPOOL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30),
        connect_timeout_secs: std::env::var("TOKPOOL_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5),
        page_size,
    })
}
