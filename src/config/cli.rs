use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Port to listen on
    #[clap(long, env = "MATCHDAY_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Base URL of the agenda site
    #[clap(long, env = "MATCHDAY_BASE_URL", default_value = "https://ge.globo.com")]
    pub base_url: String,

    /// Timeout for fetching the agenda page, in seconds
    #[arg(long, default_value_t = 30)]
    pub fetch_timeout: u64,

    /// Path to a JSON file overriding the default markup selectors
    #[arg(long)]
    pub selectors_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
