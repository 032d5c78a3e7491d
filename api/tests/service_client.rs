//! Service client behaviour against a fake calculation/report backend.

use api::{ApiError, CalculationRequest, Endpoints, ReportPayload, ServiceClient, UseTypeArea};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FALLBACK: &str = "ll97_report.pdf";

fn client_for(server: &MockServer) -> ServiceClient {
    let endpoints =
        Endpoints::new(&server.uri(), "/calculate", "/generate-report").expect("endpoints");
    ServiceClient::new(endpoints)
}

fn sample_request() -> CalculationRequest {
    CalculationRequest {
        building_name: "Main St".into(),
        use_types: vec![UseTypeArea {
            use_type: "Office".into(),
            area: 50_000.0,
        }],
        electricity: 1_000_000.0,
        ..Default::default()
    }
}

#[tokio::test]
async fn calculate_posts_camel_case_json_and_decodes_periods() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/calculate"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "buildingName": "Main St",
            "useTypes": [{ "useType": "Office", "area": 50000.0 }],
            "fuelOil2": 0.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "buildingName": "Main St",
            "areas": { "Office": 50000.0 },
            "utilityUsage": { "electricity": 1000000.0 },
            "periods": [
                { "label": "2024-2029", "totalEmissions": 120.0, "totalLimit": 100.0,
                  "overage": 20.0, "penalty": 5360.0 },
                { "label": "2030-2034", "totalEmissions": 120.0, "totalLimit": 60.0,
                  "overage": 60.0, "penalty": 16080.0 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let model = client_for(&server)
        .calculate(&sample_request())
        .await
        .expect("calculation");

    assert_eq!(model.building_name, "Main St");
    assert_eq!(model.periods.len(), 2);
    assert_eq!(model.periods[1].total_limit, Some(60.0));
    assert_eq!(model.utility("electricity"), 1_000_000.0);
}

#[tokio::test]
async fn calculate_maps_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/calculate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .calculate(&sample_request())
        .await
        .expect_err("server error");

    assert!(
        matches!(&err, ApiError::Status { endpoint, status: 500 } if endpoint == "/calculate"),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn calculate_rejects_body_without_periods() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/calculate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "areas": {} })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .calculate(&sample_request())
        .await
        .expect_err("missing periods");
    assert!(matches!(err, ApiError::MissingPeriods), "unexpected error: {err:?}");
}

#[tokio::test]
async fn report_uses_filename_from_header() {
    let server = MockServer::start().await;
    let pdf = b"%PDF-1.4 fake".to_vec();

    Mock::given(method("POST"))
        .and(path("/generate-report"))
        .and(body_partial_json(json!({
            "buildingName": "Main St",
            "chartImageBase64": "data:image/png;base64,AAAA"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "content-disposition",
                    "attachment; filename=ll97_report_Main_St.pdf",
                )
                .set_body_raw(pdf.clone(), "application/pdf"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let payload = ReportPayload {
        request: sample_request(),
        chart_image_base64: Some("data:image/png;base64,AAAA".into()),
    };
    let report = client_for(&server)
        .generate_report(&payload, FALLBACK)
        .await
        .expect("report");

    assert_eq!(report.filename, "ll97_report_Main_St.pdf");
    assert_eq!(report.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(report.bytes, pdf);
}

#[tokio::test]
async fn report_without_disposition_uses_fallback_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-report"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF".to_vec(), "application/pdf"))
        .mount(&server)
        .await;

    let payload = ReportPayload {
        request: sample_request(),
        chart_image_base64: None,
    };
    let report = client_for(&server)
        .generate_report(&payload, FALLBACK)
        .await
        .expect("report");
    assert_eq!(report.filename, FALLBACK);
}

#[tokio::test]
async fn report_failure_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-report"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let payload = ReportPayload::default();
    let err = client_for(&server)
        .generate_report(&payload, FALLBACK)
        .await
        .expect_err("bad gateway");
    assert_eq!(err.status(), Some(502));
}
