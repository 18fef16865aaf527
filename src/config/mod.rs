use crate::config::cli::Args;
use crate::error::Result;
use clap::Parser;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub mod cli;

/// CSS selectors locating the agenda markup regions. The upstream page is
/// built with styled-components, so class names carry a build-specific hash
/// suffix; the defaults match on the stable semantic part of the name where
/// one exists, and can be replaced wholesale via `--selectors-file` when the
/// site ships new markup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub championship_group: String,
    pub championship_name: String,
    pub match_card: String,
    pub card_text: String,
    pub team_name: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            championship_group: "div[class*='GroupByChampionshipsWrapper']".to_string(),
            championship_name: "span[class*='ChampionshipName']".to_string(),
            match_card: "a[class*='sc-eldPxv']".to_string(),
            card_text: "span[class*='sc-jXbUNg']".to_string(),
            team_name: "span[class*='sc-eeDRCY']".to_string(),
        }
    }
}

pub struct Config {
    pub args: Args,
    pub selector_config: SelectorConfig,
    pub http_client: Client,
}

impl Config {
    pub fn new() -> Result<Self> {
        let args = Args::parse();

        let selector_config = match &args.selectors_file {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => SelectorConfig::default(),
        };

        let http_client = Client::builder()
            .timeout(Duration::from_secs(args.fetch_timeout))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            args,
            selector_config,
            http_client,
        })
    }
}
