use matchday::api::{self, AppState};
use matchday::config::Config;
use matchday::error::Result;
use matchday::extractor::SelectorSet;
use matchday::fetcher::AgendaFetcher;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.args.log_level))
        .init();

    let selectors = SelectorSet::new(&config.selector_config)?;
    let fetcher = AgendaFetcher::new(config.http_client.clone(), config.args.base_url.clone());
    let state = AppState {
        fetcher: Arc::new(fetcher),
        selectors: Arc::new(selectors),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.args.port));
    api::serve(state, addr).await
}
