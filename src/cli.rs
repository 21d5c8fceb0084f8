use clap::{Parser, Subcommand};
use hlsforge::config::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hlsforge")]
#[command(author, version, about = "HLS playlist inspection and rewriting tool")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a playlist and print it in the chosen format
    Parse {
        /// Playlist file, or `-` to read stdin
        #[arg(required = true)]
        input: PathBuf,

        /// URL the playlist was fetched from; relative URLs resolve against it
        #[arg(short, long)]
        base_url: Option<String>,

        /// Output format (defaults to the config's, then `text`)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Literal string appended to every entry URL
        #[arg(short, long)]
        suffix: Option<String>,
    },

    /// Parse a playlist and report its type, entry counts and diagnostics
    Check {
        /// Playlist file, or `-` to read stdin
        #[arg(required = true)]
        input: PathBuf,

        /// URL the playlist was fetched from; relative URLs resolve against it
        #[arg(short, long)]
        base_url: Option<String>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
