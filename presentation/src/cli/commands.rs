//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for tool results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary header followed by the pretty-printed result
    Text,
    /// Compact JSON envelope only
    Json,
}

impl From<OutputFormat> for secscope_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => secscope_domain::OutputFormat::Text,
            OutputFormat::Json => secscope_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for secscope
#[derive(Parser, Debug)]
#[command(name = "secscope")]
#[command(author, version, about = "LLM-backed security analysis router")]
#[command(long_about = r#"
secscope routes a natural-language security request to one of four analysis
tools and always returns a well-formed JSON result.

Tools:
  phishing   analyze suspicious emails/messages
  vuln       static vulnerability scan of a code snippet
  config     secrets and misconfigurations in config files
  classify   label input as safe / suspicious / high-risk

Every tool call escalates from a fast model to a strong model (and asks for
the missing suffix of truncated output) before degrading to bounded raw text.

Configuration files are loaded from (in priority order):
1. SECSCOPE_* environment variables (SECSCOPE_RECOVERY__CONTINUATION=false)
2. --config <path>      Explicit config file
3. ./secscope.toml      Project-level config
4. ~/.config/secscope/config.toml   Global config

Example:
  secscope route "scan this code for sql injection: SELECT * FROM t WHERE id=$id"
  secscope run-tool config - < deploy.yaml
  secscope serve --bind 0.0.0.0:8080
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (defaults to [output] format in config, then text)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress stage progress on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of global and project configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write tracing output to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Route a query to the best tool and print the {tool, result} envelope
    Route {
        /// The request, e.g. "is this email phishing? ..."
        query: String,
    },

    /// Run one tool directly, bypassing the router
    RunTool {
        /// Tool name: phishing, vuln, config or classify
        tool: String,

        /// Content to analyze (`-` reads stdin)
        content: String,

        /// Language hint for code and config tools
        #[arg(short, long, value_name = "HINT")]
        language: Option<String>,
    },

    /// Start the HTTP request boundary
    Serve {
        /// Socket address to listen on (overrides [server] bind)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
}
