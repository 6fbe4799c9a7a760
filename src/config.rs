//! Command line and environment configuration

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use url::Url;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Parser)]
#[command(name = "animewall", version, about = "Browse wallpapers for your completed anime")]
pub struct Config {
    /// Base URL of the wallpaper aggregation service
    #[arg(long, env = "ANIMEWALL_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Request timeout in seconds; unbounded unless given
    #[arg(long, env = "ANIMEWALL_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// How many thumbnails to load at once
    #[arg(long, default_value_t = 6)]
    pub image_concurrency: usize,

    /// Skip loading thumbnails and covers
    #[arg(long)]
    pub no_image_check: bool,

    /// MyAnimeList username to look up right away
    pub username: Option<String>,
}

impl Config {
    /// Parse the server URL and reject anything that is not http(s)
    pub fn server_url(&self) -> Result<Url> {
        let url = Url::parse(&self.server)
            .with_context(|| format!("invalid server url `{}`", self.server))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            bail!("server url must use http or https, got `{}`", url.scheme());
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(|secs| Duration::from_secs(secs.max(1)))
    }

    pub fn image_concurrency(&self) -> usize {
        self.image_concurrency.max(1)
    }

    pub fn validate(&self) -> Result<()> {
        self.server_url()?;
        Ok(())
    }
}
