use crate::{
    config::AppConfig,
    models::Decision,
    route_table::{ResolvedRoute, same_path},
    session::SessionStore,
};

/// Transition
///
/// What the routing layer is told to do next. Handed to the `before_each` callback
/// exactly once per transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Proceed,
    Redirect(String),
}

/// decide
///
/// The guard's decision table. Evaluated in order, first match wins:
/// 1. protected target without a session goes to the login view;
/// 2. the login view with a session goes to the dashboard;
/// 3. everything else is allowed.
///
/// The order matters for a route that is both protected and the login route.
pub fn decide(requires_auth: bool, is_login_route: bool, has_session: bool) -> Decision {
    if requires_auth && !has_session {
        Decision::RedirectToLogin
    } else if is_login_route && has_session {
        Decision::RedirectToDashboard
    } else {
        Decision::Allow
    }
}

/// NavigationGuard
///
/// Gates every route transition on the presence of a session record.
///
/// Holds no state of its own: anonymous vs. authenticated is re-derived from the
/// injected store on every call, and the store is only ever read.
#[derive(Debug, Clone)]
pub struct NavigationGuard<S> {
    store: S,
    login_path: String,
    dashboard_path: String,
}

impl<S: SessionStore> NavigationGuard<S> {
    pub fn new(store: S, login_path: impl Into<String>, dashboard_path: impl Into<String>) -> Self {
        Self {
            store,
            login_path: login_path.into(),
            dashboard_path: dashboard_path.into(),
        }
    }

    pub fn from_config(store: S, config: &AppConfig) -> Self {
        Self::new(store, &config.login_path, &config.dashboard_path)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The login route is recognised by its canonical table path, so `/Login/` counts too.
    pub fn check(&self, target: &ResolvedRoute<'_>) -> Decision {
        let has_session = self.store.current().is_some();
        let is_login_route = same_path(target.path(), &self.login_path);

        let decision = decide(target.requires_auth(), is_login_route, has_session);
        tracing::debug!(
            target_path = target.path(),
            requires_auth = target.requires_auth(),
            has_session,
            ?decision,
            "Navigation guard evaluated"
        );
        decision
    }

    /// Maps a decision onto the path the routing layer should resolve next.
    pub fn transition(&self, decision: Decision) -> Transition {
        match decision {
            Decision::Allow => Transition::Proceed,
            Decision::RedirectToLogin => Transition::Redirect(self.login_path.clone()),
            Decision::RedirectToDashboard => Transition::Redirect(self.dashboard_path.clone()),
        }
    }

    /// before_each
    ///
    /// Pre-transition hook. `next` is consumed, so it is called exactly once.
    pub fn before_each<F>(&self, to: &ResolvedRoute<'_>, from: &ResolvedRoute<'_>, next: F)
    where
        F: FnOnce(Transition),
    {
        let transition = self.transition(self.check(to));
        if let Transition::Redirect(path) = &transition {
            tracing::info!(from = from.path(), to = to.path(), redirect = %path, "Navigation redirected");
        }
        next(transition);
    }
}
