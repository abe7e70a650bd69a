use axum::{
    extract::{FromRef, Request, State},
    http::HeaderName,
    Router,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Navigation core: session access, route table, guard and router adapter.
pub mod session;
pub mod route_table;
pub mod guard;
pub mod navigator;

// HTTP surface and supporting types.
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
use routes::{public, views};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use guard::{NavigationGuard, Transition, decide};
pub use navigator::{Navigation, Navigator};
pub use route_table::{RouteDescriptor, RouteTable};
pub use session::{MemorySessionStore, RequestSessionStore, SessionStore};

/// ApiDoc
///
/// OpenAPI document for the JSON endpoints, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::navigate),
    components(
        schemas(
            models::NavigateRequest, models::NavigateResponse, models::Decision,
            models::SessionRecord,
        )
    ),
    tags(
        (name = "recordatorios-web", description = "Recordatorios navigation API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared, immutable state: the static route table and the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            routes: Arc::new(RouteTable::application()),
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for Arc<RouteTable> {
    fn from_ref(app_state: &AppState) -> Arc<RouteTable> {
        app_state.routes.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// navigation_middleware
///
/// Adapter between the HTTP router and `NavigationGuard::before_each`.
///
/// A redirect decision short-circuits the request with `303 See Other`; otherwise the
/// view handler runs.
async fn navigation_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    match handlers::guard_transition(&state, &jar, &request) {
        Transition::Proceed => next.run(request).await,
        Transition::Redirect(path) => Redirect::to(&path).into_response(),
    }
}

/// create_router
///
/// Assembles the routing structure from the state's route table, applies the guard to
/// the view routes and the observability layers to everything.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes(&state.routes))
        // View routes: every request passes the navigation guard first.
        .merge(
            views::view_routes(&state.routes).route_layer(middleware::from_fn_with_state(
                state.clone(),
                navigation_middleware,
            )),
        )
        // Other spellings of table paths, then the built SPA assets.
        .fallback(handlers::route_fallback)
        .with_state(state);

    // 3. Observability and Correlation Layers
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    MakeRequestUuid,
                ))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request span, tagging it with the `x-request-id` set above so every
/// log line of one request (guard decisions included) can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
