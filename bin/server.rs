// Sales Dashboard - Web Server
// Serves the dashboard page plus a JSON API; the page is the rendering
// collaborator and only ever receives declarative ChartSpec values.

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use sales_dashboard::{
    format_sales, ChartSpec, DashboardConfig, DashboardController, FormattedSalesTable,
    RegionSelection,
};

/// Shared application state.
/// The table is immutable after load, so a plain Arc is enough - every
/// request reads the same controller without locking.
#[derive(Clone)]
struct AppState {
    controller: Arc<DashboardController>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: String) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message),
        }
    }
}

/// Summary response for the dashboard header
#[derive(Serialize)]
struct SummaryResponse {
    title: String,
    total_rows: usize,
    regions: Vec<String>,
    default_selection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_date: Option<String>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/regions - Selector values ("all" plus each region)
async fn get_regions(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.controller.selector_values()))
}

/// GET /api/summary - Row counts and date range for the header
async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    let controller = &state.controller;
    let table = controller.table();
    let range = table.date_range();

    Json(ApiResponse::ok(SummaryResponse {
        title: controller.config().title.clone(),
        total_rows: table.len(),
        regions: table
            .regions_present()
            .iter()
            .map(|r| r.to_string())
            .collect(),
        default_selection: controller.config().default_selection.to_string(),
        first_date: range.map(|(from, _)| from.to_string()),
        last_date: range.map(|(_, to)| to.to_string()),
    }))
}

/// GET /api/chart/:region - The render operation.
/// Unknown selector values are rejected here, before the controller runs.
async fn get_chart(
    State(state): State<AppState>,
    AxumPath(region): AxumPath<String>,
) -> impl IntoResponse {
    match RegionSelection::parse(&region) {
        Ok(selection) => {
            let spec: ChartSpec = state.controller.render_chart(selection);
            (StatusCode::OK, Json(ApiResponse::ok(spec))).into_response()
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(e.to_string())),
        )
            .into_response(),
    }
}

/// GET / - Serve the dashboard page (the rendering collaborator)
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Sales Dashboard - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Explicit initialization: load + format once, then hand the
    // immutable table to the controller
    let config_path = std::env::args().nth(1);
    let config = match config_path {
        Some(path) => DashboardConfig::from_toml_file(Path::new(&path))
            .expect("Failed to load config file"),
        None => DashboardConfig::default(),
    };

    println!("📂 Loading {} sales files...", config.input_files.len());
    let outcome = match format_sales(&config.input_files, &config.target_product) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("❌ Failed to load sales data: {:#}", e);
            eprintln!("   Check the input_files paths in your config.");
            std::process::exit(1);
        }
    };

    if !outcome.skipped.is_empty() {
        eprintln!("⚠️  Skipped {} malformed rows:", outcome.skipped.len());
        for skipped in &outcome.skipped {
            eprintln!("   {}", skipped);
        }
    }
    println!("✓ Loaded {} formatted rows", outcome.records.len());

    let table = FormattedSalesTable::new(outcome.records);
    let state = AppState {
        controller: Arc::new(DashboardController::new(table, config)),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/regions", get(get_regions))
        .route("/summary", get(get_summary))
        .route("/chart/:region", get(get_chart))
        .with_state(state);

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/chart/all");
    println!("   UI:  http://localhost:3000");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
