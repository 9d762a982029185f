// Loan Desk - JSON API
//
// Read-only access to the sample loans plus a stateless spreading calculator.
// Nothing posted here is stored: every request builds its own worksheet.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::loans::{group_by_category, AttachmentGroup, LoanCatalog, LoanRecord, LoanStatus};
use crate::spreading::{
    calculate_ratios, calculate_total, net_income, net_worth, CategoryKind, PeriodValues,
    RatioReport, SpreadingGrid, StatementKind, Worksheet, PERIODS,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<LoanCatalog>,
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

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ApiResponse {
        success: false,
        data: serde_json::Value::Null,
        error: Some(message.into()),
    };
    (status, Json(body)).into_response()
}

/// Loan list entry
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoanSummaryResponse<'a> {
    application_id: &'a str,
    company_name: &'a str,
    status: &'a LoanStatus,
    loan_amount: f64,
}

/// Merged loan record with its attachments grouped by category
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoanDetailResponse<'a> {
    #[serde(flatten)]
    record: &'a LoanRecord,
    attachment_groups: Vec<AttachmentGroup<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryTotalResponse {
    statement: StatementKind,
    category: CategoryKind,
    totals: PeriodValues<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisResponse {
    periods: Vec<String>,
    totals: Vec<CategoryTotalResponse>,
    net_worth: PeriodValues<f64>,
    net_income: PeriodValues<f64>,
    ratios: RatioReport,
}

impl AnalysisResponse {
    fn from_worksheet(worksheet: &Worksheet) -> Self {
        let totals = CategoryKind::ALL
            .into_iter()
            .map(|category| CategoryTotalResponse {
                statement: category.statement(),
                category,
                totals: calculate_total(worksheet.category(category)),
            })
            .collect();

        Self {
            periods: PERIODS.iter().map(|p| p.label()).collect(),
            totals,
            net_worth: net_worth(worksheet),
            net_income: net_income(worksheet),
            ratios: calculate_ratios(worksheet),
        }
    }
}

/// One cell edit against a posted worksheet
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest {
    worksheet: Worksheet,
    statement: String,
    category: String,
    item: String,
    period: usize,
    value: String,
}

#[derive(Serialize)]
struct UpdateResponse {
    worksheet: Worksheet,
    analysis: AnalysisResponse,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/loans - List all sample loans
async fn list_loans(State(state): State<AppState>) -> Response {
    let response: Vec<LoanSummaryResponse> = state
        .catalog
        .loans()
        .iter()
        .map(|loan| LoanSummaryResponse {
            application_id: &loan.application_id,
            company_name: &loan.company_name,
            status: &loan.status,
            loan_amount: loan.loan_amount,
        })
        .collect();

    (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
}

/// GET /api/loans/random - One loan picked at random
async fn random_loan(State(state): State<AppState>) -> Response {
    let record = state.catalog.select_random(&mut rand::thread_rng());
    loan_detail(&record)
}

/// GET /api/loans/:id - One loan by application id
///
/// `Path` has already percent-decoded the id once.
async fn get_loan(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.catalog.find(&id) {
        Ok(record) => loan_detail(&record),
        Err(e) => error_response(StatusCode::NOT_FOUND, e.to_string()),
    }
}

fn loan_detail(record: &LoanRecord) -> Response {
    let response = LoanDetailResponse {
        record,
        attachment_groups: group_by_category(&record.attachments),
    };
    (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
}

/// GET /api/spreading/template - Default worksheet, all values blank
async fn worksheet_template() -> Response {
    let worksheet = Worksheet::with_defaults();
    (StatusCode::OK, Json(ApiResponse::ok(worksheet))).into_response()
}

/// POST /api/spreading/analyze - Totals and ratios for a posted worksheet
async fn analyze_worksheet(payload: Result<Json<Worksheet>, JsonRejection>) -> Response {
    let Json(worksheet) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("rejected worksheet payload: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let analysis = AnalysisResponse::from_worksheet(&worksheet);
    (StatusCode::OK, Json(ApiResponse::ok(analysis))).into_response()
}

/// POST /api/spreading/update - Apply one cell edit and return the result
async fn update_worksheet(payload: Result<Json<UpdateRequest>, JsonRejection>) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("rejected update payload: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let (statement, category) = match (
        request.statement.parse::<StatementKind>(),
        request.category.parse::<CategoryKind>(),
    ) {
        (Ok(statement), Ok(category)) => (statement, category),
        (Err(e), _) | (_, Err(e)) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let mut grid = SpreadingGrid::from_worksheet(request.worksheet);
    if let Err(e) = grid.update_value(statement, category, &request.item, request.period, &request.value) {
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }

    let worksheet = grid.worksheet().clone();
    let analysis = AnalysisResponse::from_worksheet(&worksheet);
    let response = UpdateResponse { worksheet, analysis };
    (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
}

/// Build the API router, mounted under `/api`
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/loans", get(list_loans))
        .route("/loans/random", get(random_loan))
        .route("/loans/:id", get(get_loan))
        .route("/spreading/template", get(worksheet_template))
        .route("/spreading/analyze", post(analyze_worksheet))
        .route("/spreading/update", post(update_worksheet))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
