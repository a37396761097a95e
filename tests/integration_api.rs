//! Router-level tests for both endpoints over stub sources.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::util::ServiceExt;

use gridmix::api::{AppState, router};
use gridmix::source::{DataSource, SampleSource};

use common::{CurveSource, FailingSource, fixed_now, windy_small_hours};

async fn get_json(source: Arc<dyn DataSource>, uri: &str) -> (StatusCode, Value) {
    let app = router(Arc::new(AppState::new(source).with_clock(fixed_now)));
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

/// Decodes the string-encoded `averages` field of one day.
fn averages(day: &Value) -> Value {
    serde_json::from_str(day["averages"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn energy_mix_reports_three_days_from_today() {
    let (status, json) = get_json(
        Arc::new(CurveSource::new(windy_small_hours)),
        "/energy-mix",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["period"]["from"], "2025-12-01T00:00:00.000Z");
    assert_eq!(json["period"]["to"], "2025-12-03T00:00:00.000Z");

    let days = json["days"].as_array().unwrap();
    let dates: Vec<&str> = days.iter().map(|d| d["date"].as_str().unwrap()).collect();
    assert_eq!(dates, ["2025-12-01", "2025-12-02", "2025-12-03"]);

    for day in days {
        let avg = averages(day);
        assert!(avg["cleanEnergyPercent"].as_f64().unwrap().is_finite());
    }

    // 4 windy slots at 80 and 44 calm ones at 20
    let second = averages(&days[1]);
    assert_eq!(second["wind"].as_f64(), Some(25.0));
    assert_eq!(second["gas"].as_f64(), Some(75.0));
    assert_eq!(second["cleanEnergyPercent"].as_f64(), Some(25.0));
}

#[tokio::test]
async fn energy_mix_averages_list_every_category() {
    let (_, json) = get_json(
        Arc::new(CurveSource::new(windy_small_hours)),
        "/energy-mix",
    )
    .await;

    let avg = averages(&json["days"][0]);
    let obj = avg.as_object().unwrap();
    for key in [
        "gas",
        "coal",
        "biomass",
        "nuclear",
        "hydro",
        "imports",
        "other",
        "wind",
        "solar",
        "cleanEnergyPercent",
    ] {
        assert!(obj.contains_key(key), "missing {key}");
    }
    assert_eq!(obj.len(), 10);
}

#[tokio::test]
async fn charging_window_finds_windy_hours() {
    let (status, json) = get_json(
        Arc::new(CurveSource::new(windy_small_hours)),
        "/optimal-charging-window?hours=2",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hours"], "2");
    assert_eq!(json["optimalWindow"]["startTime"], "2025-12-02T01:00Z");
    assert_eq!(json["optimalWindow"]["endTime"], "2025-12-02T03:00Z");
    assert_eq!(
        json["optimalWindow"]["averageCleanEnergyPercent"].as_f64(),
        Some(80.0)
    );
}

#[tokio::test]
async fn charging_window_ties_resolve_to_earliest() {
    // Both 00:00-03:00 and 01:00-04:00 cover the four windy slots plus two calm ones.
    let (status, json) = get_json(
        Arc::new(CurveSource::new(windy_small_hours)),
        "/optimal-charging-window?hours=3",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["optimalWindow"]["startTime"], "2025-12-02T00:00Z");
    assert_eq!(json["optimalWindow"]["endTime"], "2025-12-02T03:00Z");
    assert_eq!(
        json["optimalWindow"]["averageCleanEnergyPercent"].as_f64(),
        Some(60.0)
    );
}

#[tokio::test]
async fn invalid_hours_never_reach_the_source() {
    let source = Arc::new(CurveSource::new(windy_small_hours));
    for uri in [
        "/optimal-charging-window",
        "/optimal-charging-window?hours=0",
        "/optimal-charging-window?hours=7",
        "/optimal-charging-window?hours=-1",
        "/optimal-charging-window?hours=two",
        "/optimal-charging-window?hours=3&hours=4",
        "/optimal-charging-window?hours=%FF",
    ] {
        let (status, json) = get_json(source.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["error"], "Hours must be set between 1 and 6");
    }
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn repeated_hours_key_gets_json_400() {
    let source = Arc::new(CurveSource::new(windy_small_hours));
    let app = router(Arc::new(AppState::new(source.clone()).with_clock(fixed_now)));
    let req = Request::builder()
        .uri("/optimal-charging-window?hours=3&hours=4")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let content_type = resp
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    assert_eq!(content_type, Some("application/json"));

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "error": "Hours must be set between 1 and 6" }));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn upstream_failure_is_generic_500() {
    for uri in ["/energy-mix", "/optimal-charging-window?hours=3"] {
        let (status, json) = get_json(Arc::new(FailingSource), uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(json, serde_json::json!({ "error": "Internal server error" }));
    }
}

#[tokio::test]
async fn sample_source_serves_both_endpoints() {
    let source: Arc<dyn DataSource> = Arc::new(SampleSource::new(42));

    let (status, json) = get_json(source.clone(), "/energy-mix").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["days"].as_array().map(Vec::len), Some(3));

    for hours in 1..=6 {
        let (status, json) =
            get_json(source.clone(), &format!("/optimal-charging-window?hours={hours}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["hours"], hours.to_string());

        let pct = json["optimalWindow"]["averageCleanEnergyPercent"]
            .as_f64()
            .unwrap();
        assert!((0.0..=100.0).contains(&pct));
        let start = json["optimalWindow"]["startTime"].as_str().unwrap();
        assert!(start.starts_with("2025-12-0"));
        assert!(start.ends_with('Z'));
    }
}

#[tokio::test]
async fn health_is_ok() {
    let (status, json) = get_json(Arc::new(FailingSource), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}
