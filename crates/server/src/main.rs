use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use server_api::{render_info_html, select_circuit, sorted_table};
use shared::{
    domain::CircuitRecord,
    error::{ApiError, ErrorCode},
    protocol::{CircuitSelection, SortedTable},
};
use storage::CircuitStore;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod page;

use app_state::AppState;
use config::load_settings;

#[derive(Debug, Deserialize)]
struct SelectQuery {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TableQuery {
    sort: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let store = CircuitStore::open_with_delimiter(&settings.data_path, settings.delimiter)
        .map_err(|error| {
            error!(
                data_path = %settings.data_path.display(),
                %error,
                "failed to load circuit data; verify the file exists and has the expected header"
            );
            error
        })?;
    info!(
        data_path = %settings.data_path.display(),
        circuits = store.len(),
        layout = %settings.layout,
        "circuit data loaded"
    );

    let app = build_router(Arc::new(AppState::new(store, &settings)));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "dashboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/circuits", get(http_list_circuits))
        .route("/api/circuits/select", get(http_select_circuit))
        .route("/api/circuits/select/html", get(http_select_circuit_html))
        .route("/api/circuits/table", get(http_sorted_table))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.to_string())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_circuits(State(state): State<Arc<AppState>>) -> Json<Vec<CircuitRecord>> {
    Json(state.api.store.records().to_vec())
}

async fn http_select_circuit(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SelectQuery>,
) -> Json<CircuitSelection> {
    Json(select_circuit(&state.api, q.name.as_deref()))
}

async fn http_select_circuit_html(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SelectQuery>,
) -> Html<String> {
    let selection = select_circuit(&state.api, q.name.as_deref());
    Html(render_info_html(&selection.info))
}

async fn http_sorted_table(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TableQuery>,
) -> Result<Json<SortedTable>, (StatusCode, Json<ApiError>)> {
    let table = sorted_table(&state.api, q.sort.as_deref())
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;
    Ok(Json(table))
}

async fn not_found() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(ErrorCode::NotFound, "no such route")),
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
