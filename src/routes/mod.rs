/// Router Module Index
///
/// Splits the HTTP surface by access policy. The navigation guard is attached as a
/// layer on the `views` router only, so API endpoints never redirect.

/// Routes reachable without any guard: health, navigation API, static redirects.
pub mod public;

/// View routes declared in the route table, gated by the navigation guard.
pub mod views;
