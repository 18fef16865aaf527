use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::{AgendaError, Result};
use crate::extractor::{self, Game, SelectorSet};
use crate::fetcher::PageFetcher;
use crate::renderer::{self, ChampionshipGames};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
    pub selectors: Arc<SelectorSet>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct PdfRequest {
    #[serde(default)]
    pub jogos: Vec<ChampionshipGames>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn error_body(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn internal_error(err: AgendaError) -> ApiError {
    warn!(%err, "request failed");
    error_body(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/get-jogos/:date", get(get_jogos))
        .route("/gerar-pdf/:date", post(gerar_pdf))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

/// GET /get-jogos/:date — fetch the agenda page and return the day's
/// fixtures as JSON. The date shape is checked before anything goes out on
/// the network, so a malformed date is a client error, not a server one.
async fn get_jogos(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> std::result::Result<Json<Vec<Game>>, ApiError> {
    if let Err(err) = extractor::format_display_date(&date) {
        return Err(error_body(StatusCode::BAD_REQUEST, err.to_string()));
    }

    let markup = state.fetcher.fetch(&date).await.map_err(internal_error)?;
    let jogos = extractor::extract(&markup, &date, &state.selectors).map_err(internal_error)?;

    if jogos.is_empty() {
        warn!(%date, "no games extracted, markup layout may have changed");
        return Err(error_body(StatusCode::NOT_FOUND, "Nenhum jogo encontrado"));
    }

    info!(%date, count = jogos.len(), "returning schedule");
    Ok(Json(jogos))
}

/// POST /gerar-pdf/:date — render the caller-supplied fixture groups into a
/// downloadable PDF.
async fn gerar_pdf(
    Path(date): Path<String>,
    Json(request): Json<PdfRequest>,
) -> std::result::Result<Response, ApiError> {
    if request.jogos.is_empty() {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "Nenhum jogo fornecido para gerar o PDF",
        ));
    }

    let pdf = renderer::render_pdf(&request.jogos, &date).map_err(internal_error)?;
    info!(%date, bytes = pdf.len(), "PDF generated");

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"agenda_ge_{date}.pdf\""),
        ),
    ];
    Ok((headers, pdf).into_response())
}
