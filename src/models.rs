use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Session Schemas ---

/// SessionRecord
///
/// The cached representation of the signed-in principal, as written by the
/// authentication provider under the session key. The guard only cares whether
/// one is present; the fields are kept so the shape is validated on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionRecord {
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

// --- Navigation Schemas ---

/// Decision
///
/// Outcome of the navigation guard for a single transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Decision {
    /// Proceed to the requested target unchanged.
    Allow,
    /// The target requires a session and none is present.
    RedirectToLogin,
    /// The target is the login view and a session is already present.
    RedirectToDashboard,
}

/// NavigateRequest
///
/// Input payload for `POST /api/navigate`.
///
/// `session` carries the raw value the client keeps in its own local storage.
/// When omitted, the session cookie sent with the request is used instead.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct NavigateRequest {
    #[schema(example = "/dashboard")]
    pub to: String,
    #[serde(default)]
    #[schema(example = "/landing")]
    pub from: Option<String>,
    #[serde(default)]
    pub session: Option<String>,
}

/// NavigateResponse
///
/// Output of `POST /api/navigate`: the first guard decision for the requested
/// target, the location the client should end up on, and each hop followed.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigateResponse {
    pub decision: Decision,
    pub location: String,
    pub hops: Vec<String>,
}
