use crate::{
    AppState, handlers,
    route_table::{RouteTable, RouteTarget},
};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints that are never redirected by the navigation guard.
pub fn public_routes(table: &RouteTable) -> Router<AppState> {
    let router = Router::new()
        // GET /health
        // Liveness check for load balancers.
        .route("/health", get(|| async { "ok" }))
        // POST /api/navigate
        // Resolves a navigation for clients that keep the session in local storage.
        .route("/api/navigate", post(handlers::navigate));

    // Redirect entries of the route table, e.g. `/` -> `/landing`.
    table
        .effective()
        .filter_map(|route| match &route.target {
            RouteTarget::Redirect(to) => Some((route.path.clone(), to.clone())),
            RouteTarget::View(_) => None,
        })
        .fold(router, |router, (path, to)| {
            router.route(&path, get(move || handlers::static_redirect(to.clone())))
        })
}
