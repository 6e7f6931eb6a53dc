//! Integration tests for the Greek payroll API.
//!
//! Drives the router end to end: reference salaries, the residency
//! exemption, the contribution ceiling, payment counts and error cases.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use greek_payroll::api::{AppState, create_router};
use greek_payroll::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/gr").expect("Failed to load config");
    create_router(AppState::new(config))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal field that the API serializes as a string.
fn field(value: &Value, name: &str) -> Decimal {
    decimal(
        value[name]
            .as_str()
            .unwrap_or_else(|| panic!("field {} is not a decimal string: {}", name, value)),
    )
}

async fn post_calculate(router: Router, body: String) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

async fn calculate(body: Value) -> (StatusCode, Value) {
    post_calculate(create_router_for_test(), body.to_string()).await
}

// =============================================================================
// Reference salaries
// =============================================================================

#[tokio::test]
async fn test_reference_salary_fourteen_payments() {
    let (status, json) = calculate(json!({
        "gross_annual": "24000",
        "payment_count": 14
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tax_year"], 2025);

    let breakdown = &json["breakdown"];
    assert_eq!(field(breakdown, "total_contributions"), decimal("3208.80"));
    assert_eq!(field(breakdown, "taxable_income"), decimal("20791.20"));
    assert_eq!(field(breakdown, "income_tax"), decimal("3321.536"));
    assert_eq!(field(breakdown, "net_annual"), decimal("17469.664"));
    assert_eq!(
        field(breakdown, "net_per_payment").round_dp(2),
        decimal("1247.83")
    );
    assert!(breakdown.get("exempted_income").is_none());
}

#[tokio::test]
async fn test_payment_count_defaults_to_fourteen() {
    let (status, json) = calculate(json!({ "gross_annual": 24000 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["input"]["payment_count"], 14);
    assert_eq!(json["breakdown"]["payment_count"], 14);
}

#[tokio::test]
async fn test_twelve_payments_only_changes_per_payment_amounts() {
    let (_, fourteen) = calculate(json!({ "gross_annual": "24000", "payment_count": 14 })).await;
    let (status, twelve) = calculate(json!({ "gross_annual": "24000", "payment_count": 12 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        field(&twelve["breakdown"], "net_annual"),
        field(&fourteen["breakdown"], "net_annual")
    );
    assert_eq!(
        field(&twelve["breakdown"], "net_per_payment").round_dp(2),
        decimal("1455.81")
    );
    assert_eq!(
        field(&twelve["breakdown"], "contributions_per_payment"),
        decimal("267.4")
    );
}

#[tokio::test]
async fn test_tax_brackets_reported_in_breakdown() {
    let (_, json) = calculate(json!({ "gross_annual": "24000" })).await;

    let brackets = json["breakdown"]["tax_brackets"].as_array().unwrap();
    assert_eq!(brackets.len(), 3);
    assert_eq!(field(&brackets[0], "tax"), decimal("900"));
    assert_eq!(field(&brackets[1], "tax"), decimal("2200"));
    assert_eq!(field(&brackets[2], "taxed_amount"), decimal("791.20"));
    assert!(brackets[2]["upper_limit"].is_string());
}

// =============================================================================
// Residency exemption
// =============================================================================

#[tokio::test]
async fn test_exemption_halves_tax_base() {
    let (status, json) = calculate(json!({
        "gross_annual": "24000",
        "moving_residency": true
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let breakdown = &json["breakdown"];
    assert_eq!(breakdown["moving_residency"], true);
    assert_eq!(field(breakdown, "exempted_income"), decimal("10395.60"));
    assert_eq!(field(breakdown, "taxable_income_for_tax"), decimal("10395.60"));
    assert_eq!(field(breakdown, "income_tax"), decimal("987.032"));
    assert_eq!(field(breakdown, "net_annual"), decimal("19804.168"));
}

#[tokio::test]
async fn test_exemption_adds_distribution_slice() {
    let (_, json) = calculate(json!({
        "gross_annual": "24000",
        "moving_residency": true
    }))
    .await;

    let slices = json["distribution"].as_array().unwrap();
    let kinds: Vec<&str> = slices.iter().map(|s| s["kind"].as_str().unwrap()).collect();
    assert_eq!(
        kinds,
        vec!["net_pay", "exempted_income", "income_tax", "social_security"]
    );
    assert_eq!(slices[1]["color"], "#FFC107");
}

// =============================================================================
// Contribution ceiling
// =============================================================================

#[tokio::test]
async fn test_contributions_capped_above_ceiling() {
    let (status, json) = calculate(json!({ "gross_annual": "150000" })).await;

    assert_eq!(status, StatusCode::OK);
    let breakdown = &json["breakdown"];
    assert_eq!(breakdown["contribution_cap_applied"], true);
    assert_eq!(field(breakdown, "contribution_base"), decimal("90871.44"));
    assert_eq!(field(breakdown, "total_contributions"), decimal("12149.511528"));

    let warnings = json["audit_trace"]["warnings"].as_array().unwrap();
    assert_eq!(warnings[0]["code"], "CONTRIBUTION_CAP_APPLIED");
}

#[tokio::test]
async fn test_contributions_constant_above_ceiling() {
    let (_, low) = calculate(json!({ "gross_annual": "100000" })).await;
    let (_, high) = calculate(json!({ "gross_annual": "500000" })).await;

    assert_eq!(
        field(&low["breakdown"], "total_contributions"),
        field(&high["breakdown"], "total_contributions")
    );
}

// =============================================================================
// Conservation
// =============================================================================

#[tokio::test]
async fn test_breakdown_and_distribution_sum_to_gross() {
    for moving_residency in [false, true] {
        let (_, json) = calculate(json!({
            "gross_annual": "57321.45",
            "payment_count": 12,
            "moving_residency": moving_residency
        }))
        .await;

        let breakdown = &json["breakdown"];
        let gross = field(breakdown, "gross_annual");
        assert_eq!(
            field(breakdown, "total_contributions")
                + field(breakdown, "income_tax")
                + field(breakdown, "net_annual"),
            gross
        );

        let slice_total: Decimal = json["distribution"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| field(s, "amount"))
            .sum();
        assert_eq!(slice_total, gross);
    }
}

// =============================================================================
// Zero and invalid input
// =============================================================================

#[tokio::test]
async fn test_zero_salary_produces_no_breakdown() {
    let (status, json) = calculate(json!({ "gross_annual": "0" })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["breakdown"].is_null());
    assert_eq!(json["distribution"].as_array().unwrap().len(), 0);
    assert_eq!(json["audit_trace"]["warnings"][0]["code"], "NO_INCOME");
}

#[tokio::test]
async fn test_negative_salary_rejected() {
    let (status, json) = calculate(json!({ "gross_annual": "-1" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("gross_annual"));
}

#[tokio::test]
async fn test_unsupported_payment_count_rejected() {
    let (status, json) = calculate(json!({
        "gross_annual": "24000",
        "payment_count": 13
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("payment_count"));
}

#[tokio::test]
async fn test_unknown_tax_year_rejected() {
    let (status, json) = calculate(json!({
        "gross_annual": "24000",
        "tax_year": 2019
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "TAX_YEAR_NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (status, json) =
        post_calculate(create_router_for_test(), "{\"gross_annual\": ".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_salary_rejected() {
    let (status, json) = calculate(json!({ "payment_count": 12 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Informational endpoints
// =============================================================================

#[tokio::test]
async fn test_tax_years_lists_2025() {
    let (status, json) = get(create_router_for_test(), "/tax-years").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["jurisdiction"]["code"], "GR");
    assert_eq!(json["jurisdiction"]["currency"], "EUR");

    let years = json["tax_years"].as_array().unwrap();
    assert_eq!(years.len(), 1);
    assert_eq!(years[0]["year"], 2025);
    assert_eq!(years[0]["payment_counts"], json!([12, 14]));
}

#[tokio::test]
async fn test_health() {
    let (status, json) = get(create_router_for_test(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
