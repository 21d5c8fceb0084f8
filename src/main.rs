mod cli;

use hlsforge::{
    config::{self, Config, OutputFormat},
    input, report,
};
use hlsforge_parser::Playlist;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "hlsforge=debug,hlsforge_parser=trace".to_string()
        } else {
            "hlsforge=info,hlsforge_parser=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Parse {
            input,
            base_url,
            format,
            suffix,
        } => parse_playlist(
            &input,
            cli.config.as_deref(),
            base_url.as_deref(),
            format,
            suffix,
        ),
        Commands::Check { input, base_url } => {
            check_playlist(&input, cli.config.as_deref(), base_url.as_deref())
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("hlsforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Read and parse `input` with the settings from `config`.
///
/// Without a base URL from either the command line or the config, a playlist
/// read from disk resolves relative URLs against its own location.
fn load_playlist(config: &Config, input: &Path, base_url: Option<&str>) -> Result<Playlist> {
    let mut parser_config = config.parser_config(base_url)?;
    if parser_config.context.is_none() {
        parser_config.context = input::file_context(input)?;
    }

    let text = input::read_input(input, config.parser.max_input_bytes)?;

    tracing::info!("Parsing playlist: {:?}", input);
    let mut playlist = Playlist::with_config(parser_config);
    playlist
        .parse(&text)
        .with_context(|| format!("Failed to parse playlist: {:?}", input))?;

    for diagnostic in playlist.diagnostics() {
        tracing::debug!("{}", diagnostic);
    }

    Ok(playlist)
}

fn parse_playlist(
    input: &Path,
    config_path: Option<&Path>,
    base_url: Option<&str>,
    format: Option<OutputFormat>,
    suffix: Option<String>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let mut playlist = load_playlist(&config, input, base_url)?;

    if let Some(suffix) = suffix.or_else(|| config.output.url_suffix.clone()) {
        playlist
            .append_url_suffix(&suffix)
            .with_context(|| format!("Failed to append URL suffix {:?}", suffix))?;
    }

    let format = format.unwrap_or(config.output.format);
    print!("{}", report::render(&playlist, format)?);
    Ok(())
}

fn check_playlist(input: &Path, config_path: Option<&Path>, base_url: Option<&str>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let playlist = load_playlist(&config, input, base_url)?;

    print!("{}", report::check(&playlist));
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            print_config(&Config::default());
        }
    }

    Ok(())
}

fn print_config(config: &Config) {
    let unset = || "(none)".to_string();
    println!(
        "  Base URL: {}",
        config.parser.base_url.clone().unwrap_or_else(unset)
    );
    println!(
        "  Max line length: {}",
        config
            .parser
            .max_line_length
            .map(|n| n.to_string())
            .unwrap_or_else(unset)
    );
    println!(
        "  Max input bytes: {}",
        config
            .parser
            .max_input_bytes
            .map(|n| n.to_string())
            .unwrap_or_else(unset)
    );
    println!("  Output format: {:?}", config.output.format);
    println!(
        "  URL suffix: {}",
        config.output.url_suffix.clone().unwrap_or_else(unset)
    );
}
