//! Integration tests for the payroll engine HTTP API.
//!
//! Drives the router end to end:
//! - Employee registration, lookup, update and removal
//! - Period generation and duplicate rejection
//! - Statistics, department metrics, distribution and top earners
//! - The plain-text report
//! - Persistence through the JSON file stores
//! - Error cases

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{create_router, AppState};
use payroll_engine::config::{ConfigLoader, PayrollConfig};
use payroll_engine::logging;
use payroll_engine::store::{
    InMemoryEmployeeStore, InMemoryPeriodStore, JsonEmployeeStore, JsonPeriodStore,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    logging::init_test();
    create_router(AppState::from_stores(
        InMemoryEmployeeStore::new(),
        InMemoryPeriodStore::new(),
        PayrollConfig::default(),
    ))
}

fn create_file_router(dir: &std::path::Path) -> Router {
    logging::init_test();
    let config = ConfigLoader::load("./config/payroll.yaml").expect("Failed to load config");
    create_router(AppState::from_stores(
        JsonEmployeeStore::new(dir.join("employees.json")),
        JsonPeriodStore::new(dir.join("periods")),
        config,
    ))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn amount(value: &Value) -> Decimal {
    decimal(value.as_str().expect("decimal serialized as string"))
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(router, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn send_raw(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn employee(id: &str, name: &str, salary: &str, department: &str, role: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "salary": salary,
        "department": department,
        "role": role
    })
}

async fn register_scenario(router: &Router) {
    let (status, _) = send(
        router,
        "POST",
        "/employees",
        Some(employee("1234567890", "Ana Lopez", "800", "Ventas", "Asesora")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        router,
        "POST",
        "/employees",
        Some(employee("0987654321", "Luis Ruiz", "1200", "IT", "Dev")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

// =============================================================================
// Employees
// =============================================================================

#[tokio::test]
async fn test_create_and_fetch_employee() {
    let router = create_router_for_test();
    register_scenario(&router).await;

    let (status, body) = send(&router, "GET", "/employees/1234567890", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ana Lopez");
    assert_eq!(amount(&body["salary"]), decimal("800"));
}

#[tokio::test]
async fn test_list_employees_in_registration_order() {
    let router = create_router_for_test();
    register_scenario(&router).await;

    let (status, body) = send(&router, "GET", "/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ana Lopez", "Luis Ruiz"]);
}

#[tokio::test]
async fn test_list_employees_with_filters() {
    let router = create_router_for_test();
    register_scenario(&router).await;

    let (_, body) = send(&router, "GET", "/employees?department=IT", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], "0987654321");

    let (_, body) = send(&router, "GET", "/employees?min_salary=800", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&router, "GET", "/employees?min_salary=1000.01", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_employee_returns_409() {
    let router = create_router_for_test();
    register_scenario(&router).await;

    let (status, body) = send(
        &router,
        "POST",
        "/employees",
        Some(employee("1234567890", "Eva Mora", "900", "IT", "Dev")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "EMPLOYEE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_invalid_employee_returns_400() {
    let router = create_router_for_test();

    let cases = [
        employee("12345", "Ana Lopez", "800", "Ventas", "Asesora"),
        employee("1234567890", "Ana Lopez", "0", "Ventas", "Asesora"),
        employee("1234567890", "Ana L0pez", "800", "Ventas", "Asesora"),
        employee("1234567890", "Ana Lopez", "800", "V", "Asesora"),
        employee("1234567890", "Ana Lopez", "800", "Ventas", "A"),
    ];

    for case in cases {
        let (status, body) = send(&router, "POST", "/employees", Some(case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "case {}", case);
        assert_eq!(body["code"], "INVALID_EMPLOYEE");
    }

    let (_, body) = send(&router, "GET", "/employees", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_salary_rejected_and_generation_still_works() {
    let router = create_router_for_test();

    let (status, body) = send(
        &router,
        "POST",
        "/employees",
        Some(employee(
            "1234567890",
            "Ana Lopez",
            "79228162514264337593543950335",
            "Ventas",
            "Asesora",
        )),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_EMPLOYEE");

    let (status, body) = send(&router, "POST", "/periods/202501", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "outcome": "no_employees" }));

    let (status, _) = send(
        &router,
        "POST",
        "/employees",
        Some(employee("1234567890", "Ana Lopez", "1000000000", "Ventas", "Asesora")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&router, "POST", "/periods/202501", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(amount(&body["total_income"]), decimal("1000000050"));
}

#[tokio::test]
async fn test_missing_field_returns_validation_error() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/employees",
        Some(json!({ "id": "1234567890", "name": "Ana Lopez" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_update_employee() {
    let router = create_router_for_test();
    register_scenario(&router).await;

    let (status, body) = send(
        &router,
        "PATCH",
        "/employees/1234567890",
        Some(json!({ "salary": "950", "role": "Supervisora" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&body["salary"]), decimal("950"));
    assert_eq!(body["role"], "Supervisora");
    assert_eq!(body["department"], "Ventas");
}

#[tokio::test]
async fn test_invalid_update_keeps_record() {
    let router = create_router_for_test();
    register_scenario(&router).await;

    let (status, _) = send(
        &router,
        "PATCH",
        "/employees/1234567890",
        Some(json!({ "salary": "-10" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&router, "GET", "/employees/1234567890", None).await;
    assert_eq!(amount(&body["salary"]), decimal("800"));
}

#[tokio::test]
async fn test_update_unknown_employee_returns_404() {
    let router = create_router_for_test();
    let (status, _) = send(
        &router,
        "PATCH",
        "/employees/5555555555",
        Some(json!({ "role": "Dev" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_employee() {
    let router = create_router_for_test();
    register_scenario(&router).await;

    let (status, _) = send(&router, "DELETE", "/employees/1234567890", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&router, "DELETE", "/employees/1234567890", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, "GET", "/employees/1234567890", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Period generation
// =============================================================================

#[tokio::test]
async fn test_generate_scenario_period() {
    let router = create_router_for_test();
    register_scenario(&router).await;

    let (status, body) = send(&router, "POST", "/periods/202501", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["period_key"], "202501");

    let items = body["line_items"].as_array().unwrap();
    assert_eq!(items.len(), 2);

    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["employee"]["name"], "Ana Lopez");
    assert_eq!(amount(&items[0]["contribution"]), decimal("75.60"));
    assert_eq!(amount(&items[0]["total_income"]), decimal("850"));
    assert_eq!(amount(&items[0]["total_deductions"]), decimal("95.60"));
    assert_eq!(amount(&items[0]["net_pay"]), decimal("754.40"));

    assert_eq!(items[1]["id"], 2);
    assert_eq!(amount(&items[1]["contribution"]), decimal("113.40"));
    assert_eq!(amount(&items[1]["net_pay"]), decimal("1116.60"));

    assert_eq!(amount(&body["total_income"]), decimal("2100"));
    assert_eq!(amount(&body["total_deductions"]), decimal("229.00"));
    assert_eq!(amount(&body["net_total"]), decimal("1871.00"));
}

#[tokio::test]
async fn test_generate_without_employees() {
    let router = create_router_for_test();

    let (status, body) = send(&router, "POST", "/periods/202501", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "outcome": "no_employees" }));

    let (_, body) = send(&router, "GET", "/periods", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_generate_twice_returns_409() {
    let router = create_router_for_test();
    register_scenario(&router).await;

    let (status, _) = send(&router, "POST", "/periods/202501", None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&router, "POST", "/periods/202501", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PERIOD_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_invalid_period_keys_return_400() {
    let router = create_router_for_test();
    register_scenario(&router).await;

    for key in ["2025", "20251", "2025013", "202513", "202500", "abcdef"] {
        let (status, body) = send(&router, "POST", &format!("/periods/{}", key), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "key {}", key);
        assert_eq!(body["code"], "INVALID_PERIOD_KEY");
    }
}

#[tokio::test]
async fn test_list_periods_and_totals() {
    let router = create_router_for_test();
    register_scenario(&router).await;

    send(&router, "POST", "/periods/202502", None).await;
    send(&router, "POST", "/periods/202501", None).await;

    let (_, body) = send(&router, "GET", "/periods", None).await;
    assert_eq!(body, json!(["202501", "202502"]));

    let (status, body) = send(&router, "GET", "/totals", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["periods"], 2);
    assert_eq!(amount(&body["net_total"]), decimal("3742.00"));
}

#[tokio::test]
async fn test_period_ids_are_sequential() {
    let router = create_router_for_test();
    register_scenario(&router).await;

    let (_, first) = send(&router, "POST", "/periods/202501", None).await;
    let (_, second) = send(&router, "POST", "/periods/202502", None).await;
    assert_eq!(first["id"], 1);
    assert_eq!(second["id"], 2);
}

// =============================================================================
// Queries
// =============================================================================

#[tokio::test]
async fn test_period_statistics() {
    let router = create_router_for_test();
    register_scenario(&router).await;
    send(&router, "POST", "/periods/202501", None).await;

    let (status, body) = send(&router, "GET", "/periods/202501/statistics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_employees"], 2);
    assert_eq!(amount(&body["total_net"]), decimal("1871.00"));
    assert_eq!(amount(&body["average_salary"]), decimal("1000"));
    assert_eq!(amount(&body["average_net"]), decimal("935.50"));
    assert_eq!(body["high_salary_count"], 1);
    assert_eq!(body["low_salary_count"], 1);
    assert_eq!(body["highest_net"]["name"], "Luis Ruiz");
    assert_eq!(body["lowest_net"]["name"], "Ana Lopez");
    assert_eq!(body["highest_salary"]["employee_id"], "0987654321");
}

#[tokio::test]
async fn test_department_metrics() {
    let router = create_router_for_test();
    register_scenario(&router).await;
    send(&router, "POST", "/periods/202501", None).await;

    let (status, body) = send(&router, "GET", "/periods/202501/departments", None).await;
    assert_eq!(status, StatusCode::OK);

    let departments = body.as_array().unwrap();
    assert_eq!(departments.len(), 2);
    assert_eq!(departments[0]["department"], "Ventas");
    assert_eq!(departments[0]["employee_count"], 1);
    assert_eq!(amount(&departments[0]["total_net"]), decimal("754.40"));
    assert_eq!(departments[1]["department"], "IT");
    assert_eq!(amount(&departments[1]["average_net"]), decimal("1116.60"));
}

#[tokio::test]
async fn test_salary_distribution() {
    let router = create_router_for_test();
    register_scenario(&router).await;
    send(&router, "POST", "/periods/202501", None).await;

    let (status, body) = send(&router, "GET", "/periods/202501/distribution", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["501-1000"], 1);
    assert_eq!(body["1001-1500"], 1);
    assert_eq!(body["0-500"], 0);
}

#[tokio::test]
async fn test_top_earners() {
    let router = create_router_for_test();
    register_scenario(&router).await;
    send(&router, "POST", "/periods/202501", None).await;

    let (status, body) = send(&router, "GET", "/periods/202501/top?limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["employee"]["name"], "Luis Ruiz");

    let (_, body) = send(&router, "GET", "/periods/202501/top?by=salary", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[1]["employee"]["name"], "Ana Lopez");

    let (status, _) = send(&router, "GET", "/periods/202501/top?by=bonus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_line_items_with_minimum_salary() {
    let router = create_router_for_test();
    register_scenario(&router).await;
    send(&router, "POST", "/periods/202501", None).await;

    let (status, body) = send(&router, "GET", "/periods/202501/line_items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&router, "GET", "/periods/202501/line_items?min_salary=1000", None).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["employee"]["id"], "0987654321");
}

#[tokio::test]
async fn test_text_report() {
    let router = create_router_for_test();
    register_scenario(&router).await;
    send(&router, "POST", "/periods/202501", None).await;

    let (status, bytes) = send_raw(&router, "GET", "/periods/202501/report", None).await;
    assert_eq!(status, StatusCode::OK);

    let report = String::from_utf8(bytes).unwrap();
    assert!(report.starts_with("PAYROLL REPORT - 202501"));
    assert!(report.contains("Net payroll: $1871.00"));
    assert!(report.contains("Highest net: Luis Ruiz ($1116.60)"));
    assert!(report.contains("Salary > $1000.00: 1"));
}

#[tokio::test]
async fn test_unknown_period_returns_404_everywhere() {
    let router = create_router_for_test();
    register_scenario(&router).await;

    for suffix in [
        "",
        "/statistics",
        "/departments",
        "/distribution",
        "/line_items",
        "/top",
        "/report",
    ] {
        let uri = format!("/periods/209912{}", suffix);
        let (status, _) = send_raw(&router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri {}", uri);
    }
}

#[tokio::test]
async fn test_snapshot_unaffected_by_later_employee_changes() {
    let router = create_router_for_test();
    register_scenario(&router).await;
    send(&router, "POST", "/periods/202501", None).await;

    send(
        &router,
        "PATCH",
        "/employees/1234567890",
        Some(json!({ "salary": "5000" })),
    )
    .await;
    send(&router, "DELETE", "/employees/0987654321", None).await;

    let (_, body) = send(&router, "GET", "/periods/202501", None).await;
    assert_eq!(body["line_items"].as_array().unwrap().len(), 2);
    assert_eq!(amount(&body["net_total"]), decimal("1871.00"));
}

// =============================================================================
// File persistence
// =============================================================================

#[tokio::test]
async fn test_periods_survive_restart_with_file_stores() {
    let dir = tempfile::tempdir().unwrap();

    let router = create_file_router(dir.path());
    register_scenario(&router).await;
    let (status, generated) = send(&router, "POST", "/periods/202501", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(dir.path().join("periods").join("payroll_202501.json").is_file());
    drop(router);

    let restarted = create_file_router(dir.path());
    let (status, loaded) = send(&restarted, "GET", "/periods/202501", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded, generated);

    let (_, employees) = send(&restarted, "GET", "/employees", None).await;
    assert_eq!(employees.as_array().unwrap().len(), 2);

    let (status, _) = send(&restarted, "POST", "/periods/202501", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_rows_in_employee_file_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let rows = json!([
        employee("1234567890", "Ana Lopez", "800", "Ventas", "Asesora"),
        employee("0987654321", "Luis Ruiz", "0", "IT", "Dev"),
        employee("123", "Eva Diaz", "900", "IT", "Dev"),
    ]);
    std::fs::write(dir.path().join("employees.json"), rows.to_string()).unwrap();

    let router = create_file_router(dir.path());
    let (_, body) = send(&router, "GET", "/employees", None).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1234567890"]);

    let (status, body) = send(&router, "POST", "/periods/202501", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["line_items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_corrupt_snapshot_returns_500() {
    let dir = tempfile::tempdir().unwrap();
    let periods = dir.path().join("periods");
    std::fs::create_dir_all(&periods).unwrap();
    std::fs::write(periods.join("payroll_202501.json"), "{ broken").unwrap();

    let router = create_file_router(dir.path());
    let (status, body) = send(&router, "GET", "/periods/202501/statistics", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "CORRUPT_SNAPSHOT");
}

#[tokio::test]
async fn test_tampered_snapshot_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_file_router(dir.path());
    register_scenario(&router).await;
    send(&router, "POST", "/periods/202501", None).await;

    let path = dir.path().join("periods").join("payroll_202501.json");
    let mut snapshot: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    snapshot["line_items"][0]["net_pay"] = json!("9999.99");
    std::fs::write(&path, snapshot.to_string()).unwrap();

    let (status, body) = send(&router, "GET", "/periods/202501", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "CORRUPT_SNAPSHOT");
}
