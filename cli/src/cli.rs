// Command-line arguments

use anyhow::{bail, Context, Result};
use clap::Parser;
use softnav_core::Config;
use std::path::PathBuf;
use url::Url;

use crate::script::Step;

/// Base URL for sites served from disk
pub const LOCAL_ORIGIN: &str = "http://localhost/";

/// Softnav - soft navigation engine, driven headlessly
#[derive(Parser, Debug)]
#[command(name = "softnav")]
#[command(version)]
#[command(about = "Replay a navigation script against a live or on-disk site", long_about = None)]
pub struct Cli {
    /// Start URL, or a path when serving from --site-dir
    pub start: String,

    /// Steps to replay: click:<href>, back, forward, hash:<id>, device:<key>, hours:<n>
    #[arg(value_name = "STEP")]
    pub steps: Vec<Step>,

    /// Serve pages from this directory instead of the network
    #[arg(long)]
    pub site_dir: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Start with reduced motion preferred
    #[arg(long)]
    pub reduced_motion: bool,

    /// Pretty-print the JSON summary
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    /// Defaults, then the config file, then the environment, then flags
    pub fn load_config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::default(),
        };

        let mut config = config.with_env();
        if self.reduced_motion {
            config.reduced_motion = true;
        }
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    pub fn start_url(&self) -> Result<Url> {
        if let Ok(url) = Url::parse(&self.start) {
            return Ok(url);
        }
        if self.site_dir.is_none() {
            bail!("Start must be an absolute URL unless --site-dir is given: {}", self.start);
        }

        let base = Url::parse(LOCAL_ORIGIN)?;
        base.join(&self.start)
            .with_context(|| format!("Invalid start path: {}", self.start))
    }
}
