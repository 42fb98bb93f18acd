use crate::metrics;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tablet_core::{
    find_charge, find_citizen, fixtures, open_cases, Capability, Charge, ChargeTotals, Citizen,
    DashboardSummary, Event, IncidentForm, Officer, PenalCodeCategory, StatusCard, TabletError,
};

#[derive(Clone)]
pub struct HttpState {
    pub shared: SharedState,
    pub catalog: Vec<PenalCodeCategory>,
    pub citizens: Vec<Citizen>,
    pub officers: Vec<Officer>,
    pub prometheus: Option<PrometheusHandle>,
}

impl HttpState {
    pub fn new(shared: SharedState, prometheus: Option<PrometheusHandle>) -> Self {
        Self {
            shared,
            catalog: fixtures::penal_code(),
            citizens: fixtures::citizens(),
            officers: fixtures::officers(),
            prometheus,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    capability: Capability,
    uptime_seconds: u64,
    events_applied: u64,
    recording: Option<String>,
}

#[derive(Serialize)]
struct SummaryResponse {
    summary: DashboardSummary,
    cards: [StatusCard; 4],
}

#[derive(Serialize)]
struct TotalsResponse {
    charges: usize,
    totals: ChargeTotals,
    formatted_fine: String,
    can_finalize: bool,
}

enum ApiError {
    NotFound(TabletError),
    Unsupported(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(e) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response(),
            ApiError::Unsupported(what) => (
                StatusCode::CONFLICT,
                Json(serde_json::json!({
                    "error": format!("{} requires the extended dashboard", what)
                })),
            )
                .into_response(),
        }
    }
}

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/state", get(state_handler))
        .route("/summary", get(summary_handler))
        .route("/cases/open", get(open_cases_handler))
        .route("/citizens", get(citizens_handler))
        .route("/catalog/penal-code", get(catalog_handler))
        .route("/report/totals", get(totals_handler))
        .route("/report/citizen/:id", post(select_citizen_handler))
        .route("/report/charges/:code", post(add_charge_handler))
        .route("/events", post(event_handler))
        .route("/incidents", post(incident_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<HttpState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK",
        capability: state.shared.capability().await,
        uptime_seconds: state.shared.uptime_seconds(),
        events_applied: state.shared.applied_count().await,
        recording: state
            .shared
            .recording_path()
            .await
            .map(|p| p.display().to_string()),
    })
}

async fn state_handler(State(state): State<HttpState>) -> impl IntoResponse {
    Json(state.shared.snapshot().await)
}

async fn summary_handler(State(state): State<HttpState>) -> impl IntoResponse {
    let snapshot = state.shared.snapshot().await;
    let summary = DashboardSummary::from_state(&snapshot, &state.officers);
    Json(SummaryResponse {
        cards: summary.cards(),
        summary,
    })
}

async fn open_cases_handler(State(state): State<HttpState>) -> impl IntoResponse {
    let snapshot = state.shared.snapshot().await;
    let open: Vec<_> = open_cases(snapshot.cases()).into_iter().cloned().collect();
    Json(open)
}

async fn citizens_handler(State(state): State<HttpState>) -> impl IntoResponse {
    Json(state.citizens)
}

async fn catalog_handler(State(state): State<HttpState>) -> impl IntoResponse {
    Json(state.catalog)
}

async fn totals_handler(State(state): State<HttpState>) -> Response {
    let snapshot = state.shared.snapshot().await;
    match snapshot.report() {
        Some(report) => {
            let totals = report.totals();
            Json(TotalsResponse {
                charges: report.charges.len(),
                formatted_fine: tablet_core::format_currency(totals.fine),
                totals,
                can_finalize: report.can_finalize(),
            })
            .into_response()
        }
        None => ApiError::Unsupported("report totals").into_response(),
    }
}

async fn select_citizen_handler(
    State(state): State<HttpState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let citizen = find_citizen(&state.citizens, &id)
        .cloned()
        .ok_or(ApiError::NotFound(TabletError::UnknownCitizen(id)))?;
    dispatch_report_event(&state, Event::SelectCitizen { citizen }).await
}

async fn add_charge_handler(
    State(state): State<HttpState>,
    Path(code): Path<String>,
) -> Result<Response, ApiError> {
    let charge: Charge = find_charge(&state.catalog, &code)
        .cloned()
        .ok_or(ApiError::NotFound(TabletError::UnknownCharge(code)))?;
    dispatch_report_event(&state, Event::AddCharge { charge }).await
}

async fn dispatch_report_event(state: &HttpState, event: Event) -> Result<Response, ApiError> {
    if state.shared.capability().await == Capability::Basic {
        return Err(ApiError::Unsupported(event.kind()));
    }
    Ok(Json(state.shared.dispatch(event).await).into_response())
}

async fn event_handler(State(state): State<HttpState>, Json(event): Json<Event>) -> impl IntoResponse {
    Json(state.shared.dispatch(event).await)
}

async fn incident_handler(
    State(state): State<HttpState>,
    Json(form): Json<IncidentForm>,
) -> Response {
    match form.validate() {
        Ok(form) => Json(state.shared.dispatch(Event::LogIncident { form }).await).into_response(),
        Err(errors) => {
            metrics::record_validation_failure(errors.len());
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "errors": errors })),
            )
                .into_response()
        }
    }
}

async fn metrics_handler(State(state): State<HttpState>) -> impl IntoResponse {
    match &state.prometheus {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "# metrics exporter not installed\n".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::OnceLock;
    use tablet_core::UuidStamper;
    use tower::ServiceExt;

    fn app(initial: tablet_core::AppState) -> Router {
        let shared = SharedState::new(initial, UuidStamper::default(), None);
        router(HttpState::new(shared, None))
    }

    // The recorder is process-global, so every test shares one handle.
    fn prometheus() -> PrometheusHandle {
        static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
        HANDLE
            .get_or_init(|| PrometheusBuilder::new().install_recorder().unwrap())
            .clone()
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_add_charge_by_code() {
        let app = app(fixtures::initial_state());
        let response = app
            .oneshot(
                Request::post("/report/charges/P-101")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["changed"], true);
        assert_eq!(body["state"]["report"]["charges"][0]["code"], "P-101");
    }

    #[tokio::test]
    async fn test_unknown_charge_is_404() {
        let app = app(fixtures::initial_state());
        let response = app
            .oneshot(
                Request::post("/report/charges/Z-999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_basic_dashboard_rejects_report_routes() {
        let app = app(fixtures::initial_basic_state());
        let response = app
            .oneshot(
                Request::post("/report/citizen/CID-1845")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_invalid_incident_is_422() {
        let app = app(fixtures::initial_state());
        let form = serde_json::to_string(&fixtures::initial_incident()).unwrap();
        let response = app
            .oneshot(
                Request::post("/incidents")
                    .header("content-type", "application/json")
                    .body(Body::from(form))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["errors"][0]["field"], "title");
    }

    #[tokio::test]
    async fn test_event_endpoint() {
        let app = app(fixtures::initial_state());
        let response = app
            .oneshot(
                Request::post("/events")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"type":"toggle_case_status","case_id":"EXP-2077"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["state"]["capability"], "extended");
        assert_eq!(body["state"]["cases"][2]["status"], "Active");
        assert_eq!(
            body["state"]["timeline"][0]["description"],
            "Status updated for EXP-2077"
        );
    }

    #[tokio::test]
    async fn test_report_totals() {
        let shared = SharedState::new(fixtures::initial_state(), UuidStamper::default(), None);
        let app = router(HttpState::new(shared.clone(), None));

        let (status, body) = get_json(app.clone(), "/report/totals").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["charges"], 0);
        assert_eq!(body["can_finalize"], false);
        assert_eq!(body["formatted_fine"], "$0");

        let citizen = fixtures::citizens().remove(0);
        shared.dispatch(Event::SelectCitizen { citizen }).await;
        for code in ["P-101", "T-250"] {
            let charge = find_charge(&fixtures::penal_code(), code).cloned().unwrap();
            shared.dispatch(Event::AddCharge { charge }).await;
        }

        let (status, body) = get_json(app, "/report/totals").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["charges"], 2);
        assert_eq!(body["can_finalize"], true);
        assert_eq!(body["formatted_fine"], "$11,000");
        assert_eq!(body["totals"]["time"], 75);
    }

    #[tokio::test]
    async fn test_report_totals_on_basic_dashboard_is_409() {
        let (status, body) = get_json(app(fixtures::initial_basic_state()), "/report/totals").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "report totals requires the extended dashboard");
    }

    #[tokio::test]
    async fn test_open_cases_skip_closed() {
        let (status, body) = get_json(app(fixtures::initial_state()), "/cases/open").await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["EXP-2093", "EXP-2089"]);
    }

    #[tokio::test]
    async fn test_citizens_directory() {
        let (status, body) = get_json(app(fixtures::initial_state()), "/citizens").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), fixtures::citizens().len());
        assert_eq!(body[1]["id"], "CID-2099");
        assert_eq!(body[1]["status"], "Wanted");
    }

    #[tokio::test]
    async fn test_health_counts_events() {
        let shared = SharedState::new(fixtures::initial_basic_state(), UuidStamper::default(), None);
        shared
            .dispatch(Event::LookupQuery {
                name: "Camila Duarte".to_string(),
            })
            .await;
        let app = router(HttpState::new(shared, None));

        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["capability"], "basic");
        assert_eq!(body["events_applied"], 1);
        assert!(body["recording"].is_null());
    }

    #[tokio::test]
    async fn test_summary_cards() {
        let (status, body) = get_json(app(fixtures::initial_state()), "/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["active_cases"], 1);
        assert_eq!(body["summary"]["officers"], 3);
        assert_eq!(body["cards"][0]["label"], "Active cases");
        assert_eq!(body["cards"][3]["tone"], "red");
    }

    #[tokio::test]
    async fn test_metrics_without_exporter_is_503() {
        let response = app(fixtures::initial_state())
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_metrics_render_dispatched_events() {
        let handle = prometheus();
        let shared = SharedState::new(fixtures::initial_state(), UuidStamper::default(), None);
        shared
            .dispatch(Event::LookupQuery {
                name: "Camila Duarte".to_string(),
            })
            .await;
        shared.dispatch(Event::FinalizeReport).await;
        let app = router(HttpState::new(shared, Some(handle)));

        let response = app
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(text.contains("tablet_events_total"), "rendered: {}", text);
        assert!(text.contains("kind=\"lookup_query\""), "rendered: {}", text);
        assert!(text.contains("tablet_noop_events_total"), "rendered: {}", text);
        assert!(text.contains("tablet_timeline_len"), "rendered: {}", text);
    }
}
