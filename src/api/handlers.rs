//! HTTP request handlers for the payroll API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeePatch, NewEmployee, PeriodKey};
use crate::service::GenerationOutcome;

use super::request::{EmployeeQuery, LineItemQuery, TopQuery};
use super::response::{ApiError, ApiErrorResponse, TotalsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/employees",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route(
            "/employees/:id",
            get(get_employee_handler)
                .patch(update_employee_handler)
                .delete(delete_employee_handler),
        )
        .route("/periods", get(list_periods_handler))
        .route(
            "/periods/:period_key",
            get(get_period_handler).post(generate_period_handler),
        )
        .route("/periods/:period_key/statistics", get(statistics_handler))
        .route("/periods/:period_key/departments", get(departments_handler))
        .route("/periods/:period_key/distribution", get(distribution_handler))
        .route("/periods/:period_key/line_items", get(line_items_handler))
        .route("/periods/:period_key/top", get(top_earners_handler))
        .route("/periods/:period_key/report", get(report_handler))
        .route("/totals", get(totals_handler))
        .with_state(state)
}

// =============================================================================
// Employees
// =============================================================================

async fn list_employees_handler(
    State(state): State<AppState>,
    query: Result<Query<EmployeeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
            return ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
                .into_response();
        }
    };
    info!(correlation_id = %correlation_id, ?query, "Listing employees");

    let service = state.service().lock().await;
    match service.find_employees(|employee| query.matches(employee)) {
        Ok(employees) => json_response(StatusCode::OK, employees),
        Err(err) => engine_error(correlation_id, err),
    }
}

async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Creating employee");

    let input = match json_body(correlation_id, payload) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let mut service = state.service().lock().await;
    match service.create_employee(input) {
        Ok(employee) => json_response(StatusCode::CREATED, employee),
        Err(err) => engine_error(correlation_id, err),
    }
}

async fn get_employee_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Fetching employee");

    let service = state.service().lock().await;
    found(correlation_id, "employee", &id, service.get_employee(&id))
}

async fn update_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeePatch>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Updating employee");

    let patch = match json_body(correlation_id, payload) {
        Ok(patch) => patch,
        Err(response) => return response,
    };
    if patch.is_empty() {
        return ApiErrorResponse::bad_request(ApiError::validation_error(
            "update must change at least one field",
        ))
        .into_response();
    }

    let mut service = state.service().lock().await;
    found(
        correlation_id,
        "employee",
        &id,
        service.update_employee(&id, &patch),
    )
}

async fn delete_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Deleting employee");

    let mut service = state.service().lock().await;
    match service.delete_employee(&id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => ApiErrorResponse::not_found("employee", &id).into_response(),
        Err(err) => engine_error(correlation_id, err),
    }
}

// =============================================================================
// Periods
// =============================================================================

async fn list_periods_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Listing periods");

    let service = state.service().lock().await;
    match service.list_periods() {
        Ok(keys) => json_response(StatusCode::OK, keys),
        Err(err) => engine_error(correlation_id, err),
    }
}

async fn generate_period_handler(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_key = %raw_key, "Generating payroll period");

    let key = match period_key(correlation_id, &raw_key) {
        Ok(key) => key,
        Err(response) => return response,
    };

    let mut service = state.service().lock().await;
    match service.generate_period(&key) {
        Ok(GenerationOutcome::Generated(period)) => {
            info!(
                correlation_id = %correlation_id,
                period_key = %key,
                employees = period.employee_count(),
                "Payroll period generated"
            );
            json_response(StatusCode::CREATED, period)
        }
        Ok(outcome @ GenerationOutcome::NoEmployees) => json_response(StatusCode::OK, outcome),
        Err(err) => engine_error(correlation_id, err),
    }
}

async fn get_period_handler(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_key = %raw_key, "Fetching period");

    let key = match period_key(correlation_id, &raw_key) {
        Ok(key) => key,
        Err(response) => return response,
    };
    let service = state.service().lock().await;
    found(correlation_id, "period", &raw_key, service.get_period(&key))
}

async fn statistics_handler(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_key = %raw_key, "Computing period statistics");

    let key = match period_key(correlation_id, &raw_key) {
        Ok(key) => key,
        Err(response) => return response,
    };
    let service = state.service().lock().await;
    found(correlation_id, "period", &raw_key, service.get_statistics(&key))
}

async fn departments_handler(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_key = %raw_key, "Computing department metrics");

    let key = match period_key(correlation_id, &raw_key) {
        Ok(key) => key,
        Err(response) => return response,
    };
    let service = state.service().lock().await;
    found(
        correlation_id,
        "period",
        &raw_key,
        service.get_department_metrics(&key),
    )
}

async fn distribution_handler(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_key = %raw_key, "Computing salary distribution");

    let key = match period_key(correlation_id, &raw_key) {
        Ok(key) => key,
        Err(response) => return response,
    };
    let service = state.service().lock().await;
    found(
        correlation_id,
        "period",
        &raw_key,
        service.salary_distribution(&key),
    )
}

async fn line_items_handler(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
    query: Result<Query<LineItemQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
            return ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
                .into_response();
        }
    };
    info!(
        correlation_id = %correlation_id,
        period_key = %raw_key,
        min_salary = ?query.min_salary,
        "Listing line items"
    );

    let key = match period_key(correlation_id, &raw_key) {
        Ok(key) => key,
        Err(response) => return response,
    };
    let service = state.service().lock().await;
    found(
        correlation_id,
        "period",
        &raw_key,
        service.line_items(&key, query.min_salary),
    )
}

async fn top_earners_handler(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
    query: Result<Query<TopQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
            return ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
                .into_response();
        }
    };
    info!(
        correlation_id = %correlation_id,
        period_key = %raw_key,
        limit = query.limit(),
        by = ?query.by,
        "Ranking top earners"
    );

    let key = match period_key(correlation_id, &raw_key) {
        Ok(key) => key,
        Err(response) => return response,
    };
    let service = state.service().lock().await;
    found(
        correlation_id,
        "period",
        &raw_key,
        service.top_earners(&key, query.limit(), query.by),
    )
}

async fn report_handler(State(state): State<AppState>, Path(raw_key): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_key = %raw_key, "Rendering payroll report");

    let key = match period_key(correlation_id, &raw_key) {
        Ok(key) => key,
        Err(response) => return response,
    };
    let service = state.service().lock().await;
    match service.render_report(&key) {
        Ok(Some(report)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            report,
        )
            .into_response(),
        Ok(None) => ApiErrorResponse::not_found("period", &raw_key).into_response(),
        Err(err) => engine_error(correlation_id, err),
    }
}

async fn totals_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Summing net totals across periods");

    let service = state.service().lock().await;
    let totals = service.list_periods().and_then(|keys| {
        Ok(TotalsResponse {
            periods: keys.len(),
            net_total: service.total_net_all_periods()?,
        })
    });
    match totals {
        Ok(totals) => json_response(StatusCode::OK, totals),
        Err(err) => engine_error(correlation_id, err),
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error(correlation_id: Uuid, err: EngineError) -> Response {
    if err.is_validation() {
        info!(correlation_id = %correlation_id, error = %err, "Rejected invalid input");
    } else {
        warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    }
    ApiErrorResponse::from(err).into_response()
}

/// 200 with the value, 404 when absent, or the mapped engine error.
fn found<T: Serialize>(
    correlation_id: Uuid,
    resource: &str,
    id: &str,
    result: EngineResult<Option<T>>,
) -> Response {
    match result {
        Ok(Some(value)) => json_response(StatusCode::OK, value),
        Ok(None) => {
            info!(correlation_id = %correlation_id, resource, id, "Not found");
            ApiErrorResponse::not_found(resource, id).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

fn period_key(correlation_id: Uuid, raw: &str) -> Result<PeriodKey, Response> {
    PeriodKey::parse(raw).map_err(|err| engine_error(correlation_id, err))
}

fn json_body<T>(correlation_id: Uuid, payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error).into_response())
}
