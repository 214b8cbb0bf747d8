//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::bins::{DataError, DistrictFilter};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/bins", get(bin_list_fragment))
        .route("/api/bins", get(list_bins))
        .route("/api/districts", get(list_districts))
        .route("/advice", post(repair_advice))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Main page: filtered map and card list plus the chat form.
///
/// A missing source file is fatal to this render: the error page is
/// returned and nothing else is processed for the request.
async fn index_page(State(state): State<AppState>, Query(query): Query<BinQuery>) -> Response {
    let table = match state.bins.load(&state.data_path).await {
        Ok(table) => table,
        Err(err) => return data_error_page(&err),
    };

    let filtered = table.filter(&query.district_filter(), query.search_term());

    let selected = match query.district_filter() {
        DistrictFilter::All => ALL_DISTRICTS.to_string(),
        DistrictFilter::Only(district) => district,
    };

    let template = IndexTemplate {
        districts: DistrictOption::build(ALL_DISTRICTS, table.districts(), &selected),
        selected,
        search: query.search_term().to_string(),
        count: filtered.len(),
        cards: BinCardView::from_table(&filtered),
        advisor_ready: state.advisor.is_configured(),
    };

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => AppError::Internal {
            message: format!("Template error: {err}"),
        }
        .into_response(),
    }
}

/// Render the user-facing error page for a data load failure.
fn data_error_page(err: &DataError) -> Response {
    tracing::error!("bin table load failed: {err}");

    let message = match err {
        DataError::Unavailable(path) => {
            format!("데이터 파일을 찾을 수 없습니다: {}", path.display())
        }
        other => other.to_string(),
    };

    let template = ErrorTemplate {
        title: "E-Cycle Navi".to_string(),
        message,
    };

    match template.render() {
        Ok(html) => (StatusCode::SERVICE_UNAVAILABLE, Html(html)).into_response(),
        Err(render_err) => AppError::Internal {
            message: format!("Template error: {render_err}"),
        }
        .into_response(),
    }
}

/// Filtered bins as JSON for the map widget.
async fn list_bins(
    State(state): State<AppState>,
    Query(query): Query<BinQuery>,
) -> Result<Json<BinsResponse>, AppError> {
    let table = state.bins.load(&state.data_path).await?;
    let filtered = table.filter(&query.district_filter(), query.search_term());
    Ok(Json(BinsResponse::from_table(&filtered)))
}

/// Distinct districts with the "전체" sentinel first.
async fn list_districts(
    State(state): State<AppState>,
) -> Result<Json<DistrictsResponse>, AppError> {
    let table = state.bins.load(&state.data_path).await?;

    let mut districts = vec![ALL_DISTRICTS.to_string()];
    districts.extend(table.districts());

    Ok(Json(DistrictsResponse { districts }))
}

/// Card list fragment for AJAX refreshes.
async fn bin_list_fragment(
    State(state): State<AppState>,
    Query(query): Query<BinQuery>,
) -> Result<Html<String>, AppError> {
    let table = state.bins.load(&state.data_path).await?;
    let filtered = table.filter(&query.district_filter(), query.search_term());

    let template = BinListTemplate {
        cards: BinCardView::from_table(&filtered),
    };
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })?;

    Ok(Html(html))
}

/// Forward a repair question to the advisory gateway.
///
/// The gateway never fails; whatever string it returns is the reply.
async fn repair_advice(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AdviceRequest>,
) -> Response {
    let reply = state.advisor.advice(&req.query).await;

    if accepts_html(&headers) {
        let template = AdviceTemplate { reply };
        match template.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => AppError::Internal {
                message: format!("Template error: {err}"),
            }
            .into_response(),
        }
    } else {
        Json(AdviceResponse { reply }).into_response()
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
    Internal { message: String },
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Unavailable(path) => AppError::NotFound {
                message: format!("데이터 파일을 찾을 수 없습니다: {}", path.display()),
            },
            other => AppError::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        tracing::error!("[{status}] {message}");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
