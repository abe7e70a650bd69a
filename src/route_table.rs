use std::fmt;

/// View
///
/// The front-end component a route renders. Rendering itself belongs to the SPA bundle;
/// the server only needs the name to label the shell it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    AuthForm,
    Dashboard,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Landing => "Landing",
            View::AuthForm => "AuthForm",
            View::Dashboard => "Dashboard",
        };
        f.write_str(name)
    }
}

/// RouteTarget
///
/// What a table entry resolves to: a rendered view, or a fixed redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    View(View),
    Redirect(String),
}

/// RouteDescriptor
///
/// Static declaration of a navigable path. Built once at startup and never mutated.
/// `requires_auth` is optional: an entry that does not declare it is public.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: Option<String>,
    pub target: RouteTarget,
    pub requires_auth: Option<bool>,
}

impl RouteDescriptor {
    pub fn view(path: &str, name: &str, view: View) -> Self {
        Self {
            path: path.to_string(),
            name: Some(name.to_string()),
            target: RouteTarget::View(view),
            requires_auth: None,
        }
    }

    pub fn redirect(path: &str, to: &str) -> Self {
        Self {
            path: path.to_string(),
            name: None,
            target: RouteTarget::Redirect(to.to_string()),
            requires_auth: None,
        }
    }

    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = Some(true);
        self
    }

    pub fn matches(&self, path: &str) -> bool {
        same_path(&self.path, path)
    }
}

/// ResolvedRoute
///
/// A requested path paired with the table entry it matched, if any.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRoute<'a> {
    requested: &'a str,
    descriptor: Option<&'a RouteDescriptor>,
}

impl<'a> ResolvedRoute<'a> {
    /// Path identity of the target: the matched entry's path, else the requested one.
    pub fn path(&self) -> &'a str {
        self.descriptor.map_or(self.requested, |d| d.path.as_str())
    }

    /// Missing metadata, or an unknown path, counts as public.
    pub fn requires_auth(&self) -> bool {
        self.descriptor
            .and_then(|d| d.requires_auth)
            .unwrap_or(false)
    }

    pub fn redirect_to(&self) -> Option<&'a str> {
        match self.descriptor.map(|d| &d.target) {
            Some(RouteTarget::Redirect(to)) => Some(to.as_str()),
            _ => None,
        }
    }

    pub fn view(&self) -> Option<View> {
        match self.descriptor.map(|d| &d.target) {
            Some(RouteTarget::View(view)) => Some(*view),
            _ => None,
        }
    }
}

/// RouteTable
///
/// Ordered list of descriptors; the first matching entry wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// The application's routes.
    ///
    /// The duplicate `/` entry (redirecting to the login view) is shadowed by the
    /// first one and is kept only so the table mirrors what the front end declares.
    pub fn application() -> Self {
        Self::new(vec![
            RouteDescriptor::redirect("/", "/landing"),
            RouteDescriptor::view("/landing", "Landing", View::Landing),
            RouteDescriptor::redirect("/", "/login"),
            RouteDescriptor::view("/login", "Login", View::AuthForm),
            RouteDescriptor::view("/dashboard", "Dashboard", View::Dashboard).requires_auth(),
        ])
    }

    pub fn resolve<'a>(&'a self, path: &'a str) -> ResolvedRoute<'a> {
        ResolvedRoute {
            requested: path,
            descriptor: self.routes.iter().find(|route| route.matches(path)),
        }
    }

    /// Entries reachable by lookup, i.e. without the shadowed duplicates.
    pub fn effective(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes
            .iter()
            .enumerate()
            .filter(|(i, route)| !self.routes[..*i].iter().any(|prev| prev.matches(&route.path)))
            .map(|(_, route)| route)
    }
}

/// Route paths compare case-insensitively and ignore a trailing slash.
pub fn same_path(a: &str, b: &str) -> bool {
    normalize(a).eq_ignore_ascii_case(normalize(b))
}

/// Drops a single trailing slash, except on the root path.
fn normalize(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    }
}
