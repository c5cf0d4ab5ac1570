use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;
use url::Url;

/// Environment variable with additional config files to load.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Loads the default config, overlaid by the files listed in
/// [`CONFIG_PATH_ENV`].
pub fn load() -> anyhow::Result<Config> {
    load_paths(&config_paths())
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    let overrides = paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    load_with_override(&overrides)
}

/// Loads the default config, overlaid by the given TOML snippets.
pub fn load_with_override(overrides: &[impl AsRef<str>]) -> anyhow::Result<Config> {
    overrides
        .iter()
        .fold(
            config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)),
            |builder, content| {
                builder.add_source(File::from_str(content.as_ref(), FileFormat::Toml))
            },
        )
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub client: ClientConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<Url>,
}

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    pub base_url: Url,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub max_messages: Option<usize>,
}

fn config_paths() -> Vec<PathBuf> {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(|paths| std::env::split_paths(&paths).collect())
        .unwrap_or_default()
}
