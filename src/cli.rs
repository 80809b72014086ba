//! CLI definitions for BrandLens.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// BrandLens CLI.
#[derive(Parser)]
#[command(name = "brandlens")]
#[command(about = "Brand voice and tone analysis for web pages")]
#[command(version)]
pub(crate) struct Cli {
    /// Settings file path (default: ~/.brandlens/settings.toml)
    #[arg(short, long, global = true, env = "BRANDLENS_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Gemini API key, overrides the stored key
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Analyze a page or a piece of text
    Analyze {
        #[command(flatten)]
        source: AnalyzeSource,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the text that would be sent for analysis
    Extract {
        #[command(flatten)]
        page: PageSource,

        /// Print the extracted content as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze a saved page and write a copy with the overlay panel injected
    Overlay {
        /// HTML file to analyze
        #[arg(long)]
        file: PathBuf,

        /// Original URL of the page
        #[arg(long)]
        url: Option<String>,

        /// Where to write the page with the overlay
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Settings management commands
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Run the local message endpoint for browser UI surfaces
    Serve {
        /// Server host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Server port
        #[arg(long, default_value_t = 8787)]
        port: u16,
    },
}

/// Where the page comes from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub(crate) struct PageSource {
    /// Fetch the page from this URL
    #[arg(long)]
    pub url: Option<String>,

    /// Read the page from a local HTML file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// A page, or free text.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub(crate) struct AnalyzeSource {
    /// Fetch the page from this URL
    #[arg(long)]
    pub url: Option<String>,

    /// Read the page from a local HTML file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Analyze this text directly
    #[arg(long)]
    pub text: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// Print one setting
    Get {
        /// Setting name
        key: String,
    },

    /// Change one setting
    Set {
        /// Setting name
        key: String,

        /// New value (empty clears optional settings)
        value: String,
    },

    /// Print every setting
    List,

    /// Restore defaults by removing the settings file
    Reset,

    /// Print the settings file path
    Path,
}
