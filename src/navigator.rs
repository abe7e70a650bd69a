use std::sync::Arc;

use crate::{
    error::NavigationError,
    guard::{NavigationGuard, Transition},
    models::Decision,
    route_table::RouteTable,
    session::SessionStore,
};

/// Navigation
///
/// Record of one completed `push`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// The path that was asked for.
    pub requested: String,
    /// Where navigation ended up.
    pub location: String,
    /// Guard decision for the first target that reached the guard.
    pub decision: Decision,
    /// Every redirect followed, static or guard-issued, in order.
    pub hops: Vec<String>,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        !self.hops.is_empty()
    }
}

/// Navigator
///
/// History-style router: owns the route table, the guard, and the committed location.
/// Every push runs the guard; guard redirects are pushed again so the guard also
/// sees the redirect target.
pub struct Navigator<S> {
    routes: Arc<RouteTable>,
    guard: NavigationGuard<S>,
    max_redirects: usize,
    current: String,
}

impl<S: SessionStore> Navigator<S> {
    pub fn new(routes: Arc<RouteTable>, guard: NavigationGuard<S>, max_redirects: usize) -> Self {
        Self {
            routes,
            guard,
            max_redirects,
            current: "/".to_string(),
        }
    }

    /// Starts from `location` without running the guard, e.g. the page a client is on.
    pub fn starting_at(mut self, location: impl Into<String>) -> Self {
        self.current = location.into();
        self
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// push
    ///
    /// Navigates to `path`. On success the final location is committed; on a redirect
    /// loop the current location is left untouched.
    pub fn push(&mut self, path: &str) -> Result<Navigation, NavigationError> {
        let mut target = path.to_string();
        let mut hops = Vec::new();
        let mut first_decision = None;

        loop {
            if hops.len() > self.max_redirects {
                tracing::warn!(path, limit = self.max_redirects, "Redirect limit exceeded");
                return Err(NavigationError::RedirectLoop {
                    path: path.to_string(),
                    limit: self.max_redirects,
                });
            }

            let resolved = self.routes.resolve(&target);

            // Static redirect entries are resolved before the guard sees anything.
            if let Some(to) = resolved.redirect_to() {
                let to = to.to_string();
                hops.push(to.clone());
                target = to;
                continue;
            }

            let decision = self.guard.check(&resolved);
            first_decision.get_or_insert(decision);

            match self.guard.transition(decision) {
                Transition::Redirect(to) => {
                    tracing::info!(from = %self.current, to = resolved.path(), redirect = %to, "Navigation redirected");
                    hops.push(to.clone());
                    target = to;
                }
                Transition::Proceed => {
                    let location = resolved.path().to_string();
                    self.current = location.clone();
                    return Ok(Navigation {
                        requested: path.to_string(),
                        location,
                        decision: first_decision.unwrap_or(Decision::Allow),
                        hops,
                    });
                }
            }
        }
    }
}
