use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

/// Source of rendered agenda markup for a given `DD-MM-YYYY` date.
///
/// The agenda page is client-side rendered, so production deployments may
/// want to put a browser-driven fetcher behind this trait; tests inject
/// canned markup through it.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, date: &str) -> Result<String>;
}

pub struct AgendaFetcher {
    client: Client,
    base_url: String,
}

impl AgendaFetcher {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl PageFetcher for AgendaFetcher {
    async fn fetch(&self, date: &str) -> Result<String> {
        let url = format!("{}/agenda/#/futebol/{}", self.base_url, date);
        info!(%url, "fetching agenda page");
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let markup = response.text().await?;
        info!(bytes = markup.len(), "agenda page fetched");
        Ok(markup)
    }
}
