use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use gridgroups::config::{Params, validate_size};
use gridgroups::error::GridError;
use gridgroups::render;
use gridgroups::{Coord, Grid, GridModel};

/// Largest grid the server will build.
const MAX_SERVER_SIZE: usize = 2_000;

type SharedModel = Arc<RwLock<GridModel>>;

#[derive(Deserialize)]
struct GridRequest {
    size: Option<usize>,
    seed: Option<u64>,
    /// Explicit grid, outer index is `y`; 0 is empty, anything else filled.
    rows: Option<Vec<Vec<u8>>>,
}

#[derive(Serialize)]
struct GridResponse {
    size: usize,
    rows: Vec<Vec<u8>>,
    group_count: usize,
    isolated_count: usize,
    data_url: String,
}

#[derive(Deserialize, Clone, Copy)]
struct GroupQuery {
    x: i32,
    y: i32,
}

#[derive(Serialize)]
struct GroupResponse {
    x: i32,
    y: i32,
    filled: bool,
    len: usize,
    cells: Vec<Coord>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<GridError> for ApiError {
    fn from(err: GridError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        warn!("request failed ({}): {}", status, error);
        (status, Json(ErrorBody { error })).into_response()
    }
}

fn encode_png(rgba: &[u8], side: usize) -> Result<String, ApiError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(rgba, side as u32, side as u32, image::ExtendedColorType::Rgba8)
        .map_err(|e| ApiError::Internal(format!("PNG encode failed: {}", e)))?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

fn describe(model: &GridModel) -> Result<GridResponse, ApiError> {
    let grid = model.grid();
    let (rgba, side) = render::render_grid(grid, &[]);
    Ok(GridResponse {
        size: model.size(),
        rows: grid
            .to_rows()
            .into_iter()
            .map(|row| row.into_iter().map(u8::from).collect())
            .collect(),
        group_count: model.group_count(),
        isolated_count: model.connectivity().isolated_count(),
        data_url: encode_png(&rgba, side)?,
    })
}

fn apply(model: &mut GridModel, req: GridRequest) -> Result<(), ApiError> {
    if let Some(rows) = req.rows {
        let grid = Grid::<bool>::from_bits(&rows)?;
        check_limit(grid.w)?;
        model.set_grid(grid)?;
        return Ok(());
    }

    let size = validate_size(req.size.unwrap_or(model.size()))?;
    check_limit(size)?;
    match req.seed {
        Some(seed) => *model = GridModel::seeded(size, seed)?,
        None => model.set_size(size)?,
    }
    Ok(())
}

fn check_limit(size: usize) -> Result<(), ApiError> {
    if size > MAX_SERVER_SIZE {
        return Err(ApiError::BadRequest(format!(
            "grid size {} exceeds the limit of {}",
            size, MAX_SERVER_SIZE
        )));
    }
    Ok(())
}

async fn grid_handler(
    State(model): State<SharedModel>,
    Json(req): Json<GridRequest>,
) -> Result<Json<GridResponse>, ApiError> {
    let response = tokio::task::spawn_blocking(move || {
        // Write lock only for the swap; readers see the old pair or the new one.
        {
            let mut guard = model
                .write()
                .map_err(|_| ApiError::Internal("model lock poisoned".into()))?;
            apply(&mut guard, req)?;
            info!("grid regenerated: {}x{}, {} groups", guard.size(), guard.size(), guard.group_count());
        }
        // Rendering and encoding run under a shared lock.
        let guard = model
            .read()
            .map_err(|_| ApiError::Internal("model lock poisoned".into()))?;
        describe(&guard)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("worker failed: {}", e)))??;

    Ok(Json(response))
}

async fn current_handler(State(model): State<SharedModel>) -> Result<Json<GridResponse>, ApiError> {
    let response = tokio::task::spawn_blocking(move || {
        let guard = model
            .read()
            .map_err(|_| ApiError::Internal("model lock poisoned".into()))?;
        describe(&guard)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("worker failed: {}", e)))??;

    Ok(Json(response))
}

fn lookup(model: &GridModel, q: GroupQuery) -> GroupResponse {
    let cells = model.connected_group(q.x, q.y).to_vec();
    GroupResponse {
        x: q.x,
        y: q.y,
        filled: model.is_filled(q.x, q.y),
        len: cells.len(),
        cells,
    }
}

async fn group_handler(
    State(model): State<SharedModel>,
    Query(q): Query<GroupQuery>,
) -> Result<Json<GroupResponse>, ApiError> {
    // std lock: never block a runtime worker on it.
    let response = tokio::task::spawn_blocking(move || {
        let guard = model
            .read()
            .map_err(|_| ApiError::Internal("model lock poisoned".into()))?;
        Ok::<_, ApiError>(lookup(&guard, q))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("worker failed: {}", e)))??;

    Ok(Json(response))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params = Params::default();
    let model: SharedModel = Arc::new(RwLock::new(GridModel::seeded(params.size, params.seed)?));

    let app = Router::new()
        .route("/api/grid", get(current_handler).post(grid_handler))
        .route("/api/group", get(group_handler))
        .layer(CorsLayer::permissive())
        .with_state(model);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("gridgroups server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
