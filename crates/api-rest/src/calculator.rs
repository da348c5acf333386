//! Number calculator service: per-number analysis, statistics and saved text reports.

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path as AxumPath, State},
    http::{header, StatusCode},
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use medcalc_core::{render_report, AnalysisService, CoreConfig, NumberRecord, ReportStatistics};
use medcalc_files::{sanitize_download_name, ReportStore};

use crate::error::ApiError;
use crate::health::HealthService;
use crate::types::{
    AnalyzeReq, AnalyzeRes, ErrorRes, HealthRes, SaveReportReq, SaveReportRes, StatisticsPayload,
};

/// Application state for the calculator service
///
/// Holds the magnitude-bounded analysis service and the reports directory.
#[derive(Clone)]
pub struct CalculatorState {
    analysis: AnalysisService,
    reports: ReportStore,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, analyze, save_report, download_report),
    components(schemas(
        AnalyzeReq,
        AnalyzeRes,
        ErrorRes,
        HealthRes,
        NumberRecord,
        medcalc_core::Parity,
        medcalc_core::Sign,
        ReportStatistics,
        SaveReportReq,
        SaveReportRes,
        StatisticsPayload,
    ))
)]
struct CalculatorApiDoc;

/// Build the calculator router from startup configuration.
pub fn calculator_router(cfg: &CoreConfig) -> Router {
    let state = CalculatorState {
        analysis: AnalysisService::new(cfg),
        reports: ReportStore::new(cfg.reports_dir()),
    };

    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/save-report", post(save_report))
        .route("/download-report/:filename", get(download_report))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", CalculatorApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the calculator.
#[axum::debug_handler]
async fn health(State(_state): State<CalculatorState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeReq,
    responses(
        (status = 200, description = "Per-number results and batch statistics", body = AnalyzeRes),
        (status = 400, description = "Missing, empty, too many or out-of-range numbers", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Classify every number and summarise the batch
///
/// Each number is checked for parity, primality, perfection and sign. The statistics carry
/// mean and median rounded to two decimals and every mode.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the body is not JSON or `numbers` is not a list of integers,
/// - `numbers` is missing or empty,
/// - there are more numbers than the configured batch limit,
/// - a number exceeds the configured maximum magnitude.
#[axum::debug_handler]
async fn analyze(
    State(state): State<CalculatorState>,
    payload: Result<Json<AnalyzeReq>, JsonRejection>,
) -> Result<Json<AnalyzeRes>, ApiError> {
    let Json(req) = payload?;
    let numbers = req.numbers.unwrap_or_default();

    // Perfect-number checks are linear in each value; keep them off the async workers.
    let service = state.analysis.clone();
    let analysis = tokio::task::spawn_blocking(move || service.analyze(&numbers))
        .await
        .map_err(|e| ApiError::Internal(format!("analysis task failed: {}", e)))??;
    let statistics = analysis.statistics();

    Ok(Json(AnalyzeRes {
        results: analysis.results,
        statistics,
    }))
}

#[utoipa::path(
    post,
    path = "/save-report",
    request_body = SaveReportReq,
    responses(
        (status = 200, description = "Report written", body = SaveReportRes),
        (status = 400, description = "Malformed body or unusable filename", body = ErrorRes),
        (status = 500, description = "Report could not be written", body = ErrorRes)
    )
)]
/// Render results and statistics as a text report and save it
///
/// The filename is reduced to its base name, `.txt` is appended if missing and the file is
/// written inside the reports directory, replacing any report of the same name.
///
/// # Errors
/// Returns `400 Bad Request` for malformed bodies or unusable filenames and
/// `500 Internal Server Error` if the reports directory or file cannot be written.
#[axum::debug_handler]
async fn save_report(
    State(state): State<CalculatorState>,
    payload: Result<Json<SaveReportReq>, JsonRejection>,
) -> Result<Json<SaveReportRes>, ApiError> {
    let Json(req) = payload?;

    let statistics = req
        .statistics
        .and_then(StatisticsPayload::into_report_statistics);
    let contents = render_report(&req.results, statistics.as_ref());

    let path = state.reports.save(req.filename.as_deref(), &contents)?;

    Ok(Json(SaveReportRes {
        message: "Report saved successfully".into(),
        filepath: path.display().to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/download-report/{filename}",
    params(
        ("filename" = String, Path, description = "Report filename; directories are ignored")
    ),
    responses(
        (status = 200, description = "Report file as an attachment", content_type = "text/plain"),
        (status = 404, description = "No such report", body = ErrorRes)
    )
)]
/// Download a saved report as an attachment.
///
/// # Errors
/// Returns `404 Not Found` if no report with that name exists.
#[axum::debug_handler]
async fn download_report(
    State(state): State<CalculatorState>,
    AxumPath(filename): AxumPath<String>,
) -> Result<Response, ApiError> {
    let name = sanitize_download_name(&filename)?;
    let bytes = state.reports.read(&name)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", name),
        )
        .header(header::CONTENT_LENGTH, bytes.len().to_string())
        .body(Body::from(bytes))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
