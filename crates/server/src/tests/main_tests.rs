use super::*;
use axum::{body, body::Body, http::Request};
use crate::config::{Layout, Settings};
use shared::{domain::SortKey, protocol::NOT_FOUND_MESSAGE};
use tower::ServiceExt;

const DATA: &str = "\
name,country,length_km,laps,turns,lap_record,last_winner,latitude,longitude
Circuit de Spa-Francorchamps,Belgium,7.004,44,19,\"1:46.286 (Valtteri Bottas, 2018)\",Lewis Hamilton,50.4372,5.9714
Autodromo Nazionale Monza,Italy,5.793,53,11,\"1:21.046 (Rubens Barrichello, 2004)\",Charles Leclerc,45.6156,9.2811
Circuit de Monaco,Monaco,3.337,78,19,\"1:12.909 (Lewis Hamilton, 2021)\",Charles Leclerc,43.7347,7.4206
";

fn test_app(layout: Layout) -> Router {
    let store = CircuitStore::from_reader(DATA.as_bytes()).expect("store");
    let settings = Settings {
        layout,
        ..Settings::default()
    };
    build_router(Arc::new(AppState::new(store, &settings)))
}

async fn get_body(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, body.to_vec())
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (status, body) = get_body(test_app(Layout::SingleColumn), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn index_serves_dashboard_page() {
    let (status, body) = get_body(test_app(Layout::TwoColumn), "/").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).expect("utf8");
    assert!(html.contains("Formula 1 Circuits"));
    assert!(html.contains("Circuit de Monaco"));
    assert!(html.contains("class=\"columns\""));
}

#[tokio::test]
async fn lists_circuits_in_load_order() {
    let (status, body) = get_body(test_app(Layout::SingleColumn), "/api/circuits").await;
    assert_eq!(status, StatusCode::OK);
    let records: Vec<CircuitRecord> = serde_json::from_slice(&body).expect("json");
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Circuit de Spa-Francorchamps",
            "Autodromo Nazionale Monza",
            "Circuit de Monaco"
        ]
    );
}

#[tokio::test]
async fn select_route_returns_summary_and_full_map() {
    let (status, body) = get_body(
        test_app(Layout::SingleColumn),
        "/api/circuits/select?name=Autodromo%20Nazionale%20Monza",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let selection: CircuitSelection = serde_json::from_slice(&body).expect("json");
    let summary = selection.info.summary().expect("summary");
    assert_eq!(summary.country, "Italy");
    assert_eq!(summary.laps, 53);
    assert_eq!(summary.lap_record, "1:21.046 (Rubens Barrichello, 2004)");
    assert_eq!(selection.figure.data[0].lat.len(), 3);
}

#[tokio::test]
async fn select_route_handles_unknown_circuit() {
    let (status, body) = get_body(
        test_app(Layout::SingleColumn),
        "/api/circuits/select?name=Unknown%20Track",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(json["info"]["status"], "not_found");
    assert_eq!(json["info"]["message"], NOT_FOUND_MESSAGE);
    assert_eq!(json["figure"], serde_json::json!({}));
}

#[tokio::test]
async fn select_route_without_name_is_not_found() {
    let (status, body) = get_body(test_app(Layout::SingleColumn), "/api/circuits/select").await;
    assert_eq!(status, StatusCode::OK);
    let selection: CircuitSelection = serde_json::from_slice(&body).expect("json");
    assert!(selection.info.summary().is_none());
    assert!(selection.figure.is_empty());
}

#[tokio::test]
async fn select_html_route_renders_fragment() {
    let (status, body) = get_body(
        test_app(Layout::SingleColumn),
        "/api/circuits/select/html?name=Circuit%20de%20Monaco",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).expect("utf8");
    assert!(html.starts_with("<h3>Circuit de Monaco - Monaco</h3>"));
    assert!(html.contains("<p>Laps: 78</p>"));
}

#[tokio::test]
async fn table_route_sorts_descending_with_stable_ties() {
    let (status, body) = get_body(
        test_app(Layout::SingleColumn),
        "/api/circuits/table?sort=turns",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let table: SortedTable = serde_json::from_slice(&body).expect("json");
    assert_eq!(table.sort, SortKey::Turns);
    assert_eq!(table.page_size, 10);
    let names: Vec<&str> = table.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Circuit de Spa-Francorchamps",
            "Circuit de Monaco",
            "Autodromo Nazionale Monza"
        ]
    );
}

#[tokio::test]
async fn table_route_defaults_to_length() {
    let (status, body) = get_body(test_app(Layout::SingleColumn), "/api/circuits/table").await;
    assert_eq!(status, StatusCode::OK);
    let table: SortedTable = serde_json::from_slice(&body).expect("json");
    assert_eq!(table.sort, SortKey::Length);
    assert_eq!(table.rows[0].name, "Circuit de Spa-Francorchamps");
}

#[tokio::test]
async fn table_route_rejects_unknown_sort_key() {
    let (status, body) = get_body(
        test_app(Layout::SingleColumn),
        "/api/circuits/table?sort=country",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: ApiError = serde_json::from_slice(&body).expect("json");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[tokio::test]
async fn unknown_route_is_a_json_not_found() {
    let (status, body) = get_body(test_app(Layout::SingleColumn), "/api/drivers").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let err: ApiError = serde_json::from_slice(&body).expect("json");
    assert_eq!(err.code, ErrorCode::NotFound);
}
