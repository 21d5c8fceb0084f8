mod types;

pub use types::*;

use anyhow::{Context, Result};
use hlsforge_parser::ParserConfig;
use std::path::Path;
use url::Url;

/// Default config locations, in lookup order.
pub const DEFAULT_PATHS: [&str; 3] = [
    "./hlsforge.toml",
    "~/.config/hlsforge/config.toml",
    "/etc/hlsforge/config.toml",
];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    for path_str in DEFAULT_PATHS {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(base_url) = &config.parser.base_url {
        parse_base_url(base_url).context("parser.base_url")?;
    }

    if config.parser.max_line_length == Some(0) {
        anyhow::bail!("parser.max_line_length must be greater than 0");
    }

    if config.parser.max_input_bytes == Some(0) {
        anyhow::bail!("parser.max_input_bytes must be greater than 0");
    }

    if let Some(suffix) = &config.output.url_suffix {
        if suffix.chars().any(char::is_whitespace) {
            anyhow::bail!("output.url_suffix must not contain whitespace");
        }
    }

    Ok(())
}

/// Parse a context URL, which must be absolute and able to act as a base.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("{raw:?} is not an absolute URL"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("{raw:?} cannot be used as a base URL");
    }
    Ok(url)
}

impl Config {
    /// Parser settings, with `base_url` taking precedence over the configured one.
    pub fn parser_config(&self, base_url: Option<&str>) -> Result<ParserConfig> {
        let context = base_url
            .or(self.parser.base_url.as_deref())
            .map(parse_base_url)
            .transpose()?;

        let mut builder = ParserConfig::builder().maybe_context(context);
        if let Some(limit) = self.parser.max_line_length {
            builder = builder.max_line_length(limit);
        }
        Ok(builder.build())
    }
}
