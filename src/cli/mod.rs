//! CLI module for Spole.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Spole - Chat with YouTube videos
///
/// Process a video once, then ask questions about its content and get
/// answers with timestamp citations. The name "Spole" comes from the
/// Norwegian word for "rewind."
#[derive(Parser, Debug)]
#[command(name = "spole")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a video: fetch metadata and transcript, build sections
    Process {
        /// YouTube URL or video ID
        input: String,

        /// Re-process even if already stored
        #[arg(short, long)]
        force: bool,
    },

    /// Start an interactive chat session about a processed video
    Chat {
        /// YouTube URL or video ID
        video: String,
    },

    /// Ask a single question about a processed video
    Ask {
        /// YouTube URL or video ID
        video: String,

        /// The question to ask
        question: String,

        /// Playback position in seconds to anchor the question
        #[arg(short = 't', long, default_value = "0")]
        at: u32,

        /// Use the larger deep-analysis context budget
        #[arg(long)]
        deep: bool,
    },

    /// List processed videos
    List,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the active configuration as TOML
    Show,

    /// Print the configuration file path
    Path,

    /// Write the default configuration file
    Init,
}
