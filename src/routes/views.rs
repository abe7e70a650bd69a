use crate::{
    AppState, handlers,
    route_table::{RouteTable, RouteTarget},
};
use axum::{Router, extract::State, routing::get};

/// Views Router Module
///
/// One GET route per view entry of the route table. Every handler here assumes the
/// navigation guard layer has already allowed the request.
pub fn view_routes(table: &RouteTable) -> Router<AppState> {
    table
        .effective()
        .filter_map(|route| match route.target {
            RouteTarget::View(view) => Some((route.path.clone(), view)),
            RouteTarget::Redirect(_) => None,
        })
        .fold(Router::new(), |router, (path, view)| {
            router.route(
                &path,
                get(move |State(state): State<AppState>| handlers::render_view(state, view)),
            )
        })
}
