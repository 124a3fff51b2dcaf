pub mod auth;
pub mod classifier;
pub mod clock;
pub mod error;
pub mod handlers;
pub mod ical;
pub mod models;
pub mod openapi;
pub mod settings;
pub mod store;
pub mod validation;
pub mod view_state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use chrono::Utc;
use chrono_tz::Tz;
use handlers::{
    classify_meetings, get_board, get_ical, get_meeting, healthz_live, healthz_ready, root,
};
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ical::ICalExporter;
use crate::openapi::ApiDoc;
use crate::settings::Settings;
use crate::store::MeetingStore;

#[derive(Clone)]
pub struct AppState {
    pub(crate) settings: Settings,
    pub(crate) tz: Tz,
    pub(crate) store: Arc<MeetingStore>,
    pub(crate) exporter: Arc<ICalExporter>,
}

impl AppState {
    pub fn new(settings: Settings, store: MeetingStore) -> Result<Self, config::ConfigError> {
        Ok(Self {
            tz: settings.tz()?,
            settings,
            store: Arc::new(store),
            exporter: Arc::new(ICalExporter::new()),
        })
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let tz = settings.tz()?;
    let store = match &settings.meetings_file {
        Some(path) => MeetingStore::from_file(path)?,
        None => {
            let today = Utc::now().with_timezone(&tz).date_naive();
            info!("No meetings file configured, serving demo meetings for {today}");
            MeetingStore::demo(today)
        }
    };

    let state = AppState::new(settings, store)?;
    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!("Starting Meeting Board API on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    // The dashboard polls from the browser on another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/meetings", get(get_board))
        .route("/meetings.ical", get(get_ical))
        .route("/meetings/classify", post(classify_meetings))
        .route("/meetings/{id}", get(get_meeting))
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(cors).layer(trace_layer)
}
