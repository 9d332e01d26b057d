//! End-to-end slice behavior against a mock API server

use edstats::prelude::*;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn dashboard_with_cache(server: &MockServer, http_cache: bool) -> Dashboard {
    let config = AppConfig {
        api: ApiConfig::new(format!("{}/api/v1/", server.uri())),
        cache: CacheConfig::new(http_cache, 300),
        auth: AuthConfig::default(),
        session: SessionConfig::new(2023, 2023, "Grade 12".to_string()),
    };
    Dashboard::new(config).unwrap()
}

/// Slice behavior is observed with the HTTP tier disabled so every
/// dispatch that passes the slice cache reaches the server.
async fn dashboard(server: &MockServer) -> Dashboard {
    dashboard_with_cache(server, false).await
}

fn staff_rows(value: f64) -> serde_json::Value {
    json!([
        {"staff_type_id": 1, "value": value, "year": 2023, "district_id": 5},
        {"staff_type_id": 2, "value": 3.0, "year": 2023, "district_id": 5}
    ])
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}

#[tokio::test]
async fn district_staff_fetch_fills_only_its_own_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/staff/district/"))
        .and(query_param("district_id", "5"))
        .and(query_param("year", "2023"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(staff_rows(12.5))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = dashboard(&server).await;
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    dashboard.signals().add_callback(move |event| {
        if let Ok(mut events) = sink.lock() {
            events.push((event.key.clone(), event.kind.clone()));
        }
    });

    let staff = dashboard.staff();
    let district_5 = DistrictYearQuery::new(5, 2023);
    let district_6 = DistrictYearQuery::new(6, 2023);
    assert_eq!(staff.district_staff_data_status(&district_5), LoadingState::Idle);

    let (rows, in_flight) = futures::join!(staff.fetch_district_staff_data(&district_5, false), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        staff.district_staff_data_status(&district_5)
    });

    assert_eq!(in_flight, LoadingState::Loading);
    assert_eq!(rows.unwrap().len(), 2);
    assert_eq!(staff.district_staff_data_status(&district_5), LoadingState::Succeeded);
    assert_eq!(staff.select_district_staff_data(&district_5).len(), 2);
    assert!(staff.select_district_staff_data(&district_6).is_empty());
    assert_eq!(staff.district_staff_data_status(&district_6), LoadingState::Idle);

    let events = events.lock().unwrap().clone();
    let key = Some("district_id=5&year=2023".to_string());
    assert_eq!(
        events,
        vec![
            (key.clone(), StoreEventKind::Pending),
            (key, StoreEventKind::Fulfilled { rows: 2 }),
        ]
    );
}

#[tokio::test]
async fn cached_key_is_served_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/staff/district/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(staff_rows(12.5)))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = dashboard(&server).await;
    let query = DistrictYearQuery::new(5, 2023);
    let first = dashboard.staff().fetch_district_staff_data(&query, false).await.unwrap();
    let second = dashboard.staff().fetch_district_staff_data(&query, false).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn force_refresh_overwrites_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/staff/district/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(staff_rows(12.5)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/staff/district/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(staff_rows(20.0)))
        .mount(&server)
        .await;

    let dashboard = dashboard(&server).await;
    let staff = dashboard.staff();
    let query = DistrictYearQuery::new(5, 2023);

    staff.fetch_district_staff_data(&query, false).await.unwrap();
    staff.fetch_district_staff_data(&query, true).await.unwrap();

    assert_eq!(request_count(&server).await, 2);
    assert_eq!(staff.select_district_staff_data(&query)[0].value, 20.0);
}

#[tokio::test]
async fn failed_refresh_keeps_stale_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/staff/district/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(staff_rows(12.5)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/staff/district/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dashboard = dashboard(&server).await;
    let staff = dashboard.staff();
    let query = DistrictYearQuery::new(5, 2023);

    staff.fetch_district_staff_data(&query, false).await.unwrap();
    let err = staff.fetch_district_staff_data(&query, true).await.unwrap_err();

    assert_eq!(err.message(), "Request failed with status code 500");
    assert_eq!(staff.district_staff_data_status(&query), LoadingState::Failed);
    assert_eq!(
        staff.district_staff_error(&query).as_deref(),
        Some("Request failed with status code 500")
    );
    assert_eq!(staff.select_district_staff_data(&query)[0].value, 12.5);
}

#[tokio::test]
async fn first_failure_leaves_selection_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/outcomes/district/graduation/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dashboard = dashboard(&server).await;
    let query = dashboard.graduation_query(Some(5), None);
    assert!(dashboard.outcomes().fetch_district_graduation(&query, false).await.is_err());

    assert!(dashboard.outcomes().select_district_graduation(&query).is_empty());
    assert_eq!(dashboard.outcomes().district_graduation_status(&query), LoadingState::Failed);
    let outcomes_state = dashboard
        .overview()
        .into_iter()
        .find(|(name, _)| *name == "outcomes")
        .map(|(_, state)| state);
    assert_eq!(outcomes_state, Some(LoadingState::Failed));
}

#[tokio::test]
async fn reference_catalogs_load_independently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/staff/types/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1, "name": "Teachers"}, {"id": 2, "name": "Aides"}])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/staff/teacher-education-types/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 7, "name": "Masters"}])))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = dashboard(&server).await;
    let staff = dashboard.staff();
    assert_eq!(staff.staff_types_status(), LoadingState::Idle);
    assert_eq!(staff.teacher_education_types_status(), LoadingState::Idle);

    let (types, education) = futures::join!(
        staff.ensure_staff_types_loaded(false),
        staff.ensure_teacher_education_types_loaded(false)
    );

    assert_eq!(types.unwrap().len(), 2);
    assert_eq!(education.unwrap()[0].name, "Masters");
    assert_eq!(staff.staff_types_status(), LoadingState::Succeeded);
    assert_eq!(staff.teacher_education_types_status(), LoadingState::Succeeded);

    // loaded catalogs are not requested again
    staff.ensure_staff_types_loaded(false).await.unwrap();
    staff.ensure_teacher_education_types_loaded(false).await.unwrap();
}

#[tokio::test]
async fn finance_report_loads_type_catalogs_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/finance/entry-types/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Local Taxes", "category": "Revenue"},
            {"id": 2, "name": "Salaries", "category": "Expenditure"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/finance/fund-types/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 10, "name": "General Fund"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/finance/report/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"entry_type_id": 1, "fund_type_id": 10, "value": 1000.0},
            {"entry_type_id": 1, "fund_type_id": 10, "value": 500.0},
            {"entry_type_id": 2, "fund_type_id": 10, "value": 800.0}
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let dashboard = dashboard(&server).await;
    let finance = dashboard.finance();
    let concord = dashboard.fiscal_year_query(5);

    finance.fetch_finance_report(&concord, false).await.unwrap();
    finance.fetch_finance_report(&dashboard.fiscal_year_query(6), false).await.unwrap();

    assert_eq!(finance.entry_types().len(), 2);
    assert_eq!(finance.fund_types().len(), 1);

    let totals = finance.select_entry_totals(&concord);
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].name, "Salaries");
    assert_eq!(totals[1].total, 1500.0);

    finance.select_entry_totals(&concord);
    assert_eq!(finance.entry_totals_computations(), 1);
}

#[tokio::test]
async fn finance_report_fails_when_types_fail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/finance/entry-types/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/finance/fund-types/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/finance/report/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let dashboard = dashboard(&server).await;
    let query = dashboard.fiscal_year_query(5);
    assert!(dashboard.finance().fetch_finance_report(&query, false).await.is_err());
    assert_eq!(dashboard.finance().finance_report_status(&query), LoadingState::Failed);
    assert_eq!(dashboard.finance().entry_types_status(), LoadingState::Failed);
    assert_eq!(dashboard.finance().fund_types_status(), LoadingState::Succeeded);
}

#[tokio::test]
async fn per_pupil_ranking_joins_district_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/location/districts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Concord"},
            {"id": 2, "name": "Bow"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/finance/per-pupil-expenditure/"))
        .and(query_param("year", "2023"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"district_id": 1, "year": 2023, "amount": 18000.0},
            {"district_id": 2, "year": 2023, "amount": 21000.0}
        ])))
        .mount(&server)
        .await;

    let dashboard = dashboard(&server).await;
    let ranking = dashboard
        .fetch_per_pupil_ranking(&YearQuery::new(2023), false)
        .await
        .unwrap();

    let names: Vec<&str> = ranking.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Bow", "Concord"]);
    assert_eq!(ranking[0].rank, 1);

    let all_districts = LocationQuery::default();
    assert_eq!(
        dashboard.location().districts_status(&all_districts),
        LoadingState::Succeeded
    );
    assert_eq!(dashboard.location().select_districts(&all_districts).len(), 2);

    // Both inputs are cached per key now
    let again = dashboard
        .fetch_per_pupil_ranking(&YearQuery::new(2023), false)
        .await
        .unwrap();
    assert_eq!(again.len(), 2);
    assert_eq!(again[0].name, "Bow");
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn http_tier_absorbs_forced_slice_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/class-size/state/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"grade": "K", "average_class_size": 16.0}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = dashboard_with_cache(&server, true).await;
    let query = YearQuery::new(2023);
    dashboard.class_size().fetch_state_class_size(&query, false).await.unwrap();
    dashboard.class_size().fetch_state_class_size(&query, true).await.unwrap();

    assert_eq!(request_count(&server).await, 1);
    assert_eq!(dashboard.class_size().state_class_size_status(&query), LoadingState::Succeeded);
}

#[tokio::test]
async fn reset_clears_both_tiers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/safety/types/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "Bullying"}])))
        .expect(2)
        .mount(&server)
        .await;

    let dashboard = dashboard_with_cache(&server, true).await;
    dashboard.safety().ensure_safety_types_loaded(false).await.unwrap();
    assert!(!dashboard.is_loading());

    dashboard.reset().await;
    assert!(dashboard.safety().safety_types().is_empty());
    assert!(dashboard.client().cache().is_empty().await);

    dashboard.safety().ensure_safety_types_loaded(false).await.unwrap();
    assert_eq!(dashboard.safety().safety_types().len(), 1);
}
