use crate::{
    AppState,
    error::AppError,
    guard::{NavigationGuard, Transition},
    models::{NavigateRequest, NavigateResponse},
    navigator::Navigator,
    route_table::View,
    session::RequestSessionStore,
};
use axum::{
    Json,
    extract::{Request, State},
    http::{Method, Uri, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::path::Path;
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// guard_transition
///
/// Runs `NavigationGuard::before_each` for an incoming view request.
///
/// The session snapshot comes from the request's session cookie; the source route is
/// taken from the `Referer` header when there is one.
pub(crate) fn guard_transition(state: &AppState, jar: &CookieJar, request: &Request) -> Transition {
    let store = RequestSessionStore::from_cookies(jar, &state.config.session_key);
    let guard = NavigationGuard::from_config(store, &state.config);

    let from_path = request
        .headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<Uri>().ok())
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| "/".to_string());

    let to = state.routes.resolve(request.uri().path());
    let from = state.routes.resolve(&from_path);

    let mut transition = Transition::Proceed;
    guard.before_each(&to, &from, |decided| transition = decided);
    transition
}

// --- Handlers ---

/// navigate
///
/// [Public Route] Runs a full navigation for a client that resolves routes itself.
///
/// The session is taken from the request body when the client sends the value it keeps
/// in local storage, otherwise from the session cookie. Static redirects and guard
/// redirects are followed until a view is reached.
#[utoipa::path(
    post,
    path = "/api/navigate",
    request_body = NavigateRequest,
    responses(
        (status = 200, description = "Navigation resolved", body = NavigateResponse),
        (status = 508, description = "Redirect loop")
    )
)]
pub async fn navigate(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<NavigateResponse>, AppError> {
    let store = match payload.session {
        Some(raw) => RequestSessionStore::from_raw(Some(raw)),
        None => RequestSessionStore::from_cookies(&jar, &state.config.session_key),
    };

    let guard = NavigationGuard::from_config(store, &state.config);
    let mut navigator = Navigator::new(state.routes.clone(), guard, state.config.max_redirects);
    if let Some(from) = payload.from {
        navigator = navigator.starting_at(from);
    }

    let navigation = navigator.push(&payload.to)?;

    Ok(Json(NavigateResponse {
        decision: navigation.decision,
        location: navigation.location,
        hops: navigation.hops,
    }))
}

/// render_view
///
/// [Guarded Route] Serves the application shell for an allowed view.
///
/// The built `index.html` is returned when the distribution directory has one; the
/// front-end router then mounts the view. Without a build, a bare shell naming the view
/// is served instead.
pub async fn render_view(state: AppState, view: View) -> Html<String> {
    let index = Path::new(&state.config.dist_dir).join("index.html");

    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::debug!(path = %index.display(), error = %e, "No SPA build found, serving bare shell");
            Html(fallback_shell(view))
        }
    }
}

/// static_redirect
///
/// [Public Route] Answers a redirect entry of the route table.
pub async fn static_redirect(to: String) -> impl IntoResponse {
    Redirect::to(&to)
}

/// route_fallback
///
/// [Guarded Route] Catches requests the exact-path routers did not match.
///
/// A table entry spelled differently (`/Dashboard/`, `/LOGIN`) is handled as the entry
/// itself: redirects are answered, views go through the guard. Anything else is a
/// static asset of the SPA build.
pub async fn route_fallback(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
) -> Response {
    let is_page_load = request.method() == Method::GET || request.method() == Method::HEAD;
    let (redirect_to, view) = {
        let resolved = state.routes.resolve(request.uri().path());
        (resolved.redirect_to().map(str::to_owned), resolved.view())
    };

    match (redirect_to, view) {
        (Some(to), _) if is_page_load => Redirect::to(&to).into_response(),
        (None, Some(view)) if is_page_load => match guard_transition(&state, &jar, &request) {
            Transition::Proceed => render_view(state, view).await.into_response(),
            Transition::Redirect(path) => Redirect::to(&path).into_response(),
        },
        _ => {
            let assets = ServeDir::new(&state.config.dist_dir);
            match assets.oneshot(request).await {
                Ok(response) => response.into_response(),
                Err(never) => match never {},
            }
        }
    }
}

fn fallback_shell(view: View) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head><meta charset=\"utf-8\"><title>Recordatorios</title></head>\n<body><div id=\"app\" data-view=\"{view}\"></div></body>\n</html>\n"
    )
}
