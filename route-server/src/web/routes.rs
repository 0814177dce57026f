//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{debug, error, warn};

use crate::network::{LookupError, catalog};
use crate::planner::{Planner, SearchError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/nodes", get(list_nodes))
        .route("/route", get(plan_route))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the route form.
async fn index_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let network = state.network.current().await;
    let nodes = match catalog(&network) {
        Ok(nodes) => nodes,
        Err(e) => {
            error!(error = %e, "network dataset is inconsistent");
            let template = ErrorTemplate {
                title: "Network unavailable".to_string(),
                message: "The transit network data could not be read.".to_string(),
                details: Some(e.to_string()),
            };
            let page = render_page(&template)?;
            return Ok((StatusCode::INTERNAL_SERVER_ERROR, page).into_response());
        }
    };

    let template = IndexTemplate {
        nodes,
        modes: ModeOption::all(&state.defaults),
        defaults: CostDefaultsView::from_config(&state.defaults),
    };
    render_page(&template)
}

/// List the selectable endpoints.
async fn list_nodes(State(state): State<AppState>) -> Result<Json<NodeListResponse>, AppError> {
    let network = state.network.current().await;
    let nodes = catalog(&network)?
        .into_iter()
        .map(|entry| NodeResult {
            id: entry.id,
            label: entry.label,
        })
        .collect();

    Ok(Json(NodeListResponse {
        nodes,
        timestamp: network.timestamp().map(str::to_string),
        loaded_at: network.loaded_at().to_rfc3339(),
    }))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan a route between two nodes.
async fn plan_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<RouteRequest>,
) -> Result<Response, AppError> {
    let (origin, destination) = req.endpoints().map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let config = req
        .cost_config(&state.defaults)
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    // Search on the blocking pool against the snapshot current at request time.
    let network = state.network.current().await;
    let outcome = tokio::task::spawn_blocking(move || {
        Planner::new(&*network, &config).route(origin, destination)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("search task failed: {e}"),
    })??;

    debug!(%origin, %destination, outcome = outcome.as_str(), "planned route");

    if accepts_html(&headers) {
        let template = RouteResultTemplate {
            route: RouteView::from_outcome(&outcome),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(RouteResponse::from_outcome(&outcome)).into_response())
    }
}

fn render_page<T: Template>(template: &T) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Network(lookup) => lookup.into(),
            SearchError::InvalidConfig(message) => AppError::BadRequest { message },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
