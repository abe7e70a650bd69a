use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::sync::{Arc, RwLock};

use crate::{error::SessionError, models::SessionRecord};

// 1. SessionStore Contract
/// SessionStore
///
/// Read access to the synchronous, string-keyed store where the authentication
/// provider leaves the serialized `SessionRecord`. The guard receives one of these
/// instead of touching ambient storage, so it can be driven deterministically in tests.
pub trait SessionStore {
    /// Returns the last value written under the session key, or `None`.
    fn read(&self) -> Option<String>;

    /// Reads and decodes the stored value.
    ///
    /// Any decode failure degrades to `None`; the reason is only logged.
    fn current(&self) -> Option<SessionRecord> {
        let raw = self.read()?;
        match SessionRecord::decode(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unreadable session value");
                None
            }
        }
    }
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn read(&self) -> Option<String> {
        (**self).read()
    }
}

impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn read(&self) -> Option<String> {
        (**self).read()
    }
}

impl SessionRecord {
    /// decode
    ///
    /// Parses a stored value. A literal `null` is a valid encoding of "no session"
    /// and yields `Ok(None)`; anything that is not a record with a non-empty `uid`
    /// is an error.
    pub fn decode(raw: &str) -> Result<Option<SessionRecord>, SessionError> {
        let record: Option<SessionRecord> = serde_json::from_str(raw)?;

        match record {
            Some(record) if record.uid.trim().is_empty() => Err(SessionError::MissingUid),
            other => Ok(other),
        }
    }

    pub fn encode(&self) -> String {
        // A struct of strings always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }
}

// 2. Request-scoped Implementation
/// RequestSessionStore
///
/// A snapshot of the session value that arrived with one HTTP request, either as a
/// cookie or as a raw value posted by a client that keeps the session itself.
#[derive(Debug, Clone, Default)]
pub struct RequestSessionStore {
    raw: Option<String>,
}

impl RequestSessionStore {
    pub fn from_raw(raw: Option<String>) -> Self {
        Self { raw }
    }

    /// Takes the value of cookie `key`. Percent-encoding is already undone by the jar.
    pub fn from_cookies(jar: &CookieJar, key: &str) -> Self {
        Self {
            raw: jar.get(key).map(Cookie::value).map(str::to_owned),
        }
    }
}

impl SessionStore for RequestSessionStore {
    fn read(&self) -> Option<String> {
        self.raw.clone()
    }
}

// 3. In-memory Implementation
/// MemorySessionStore
///
/// Process-local store standing in for browser storage. The write side is what the
/// authentication provider would drive on sign-in and sign-out; the guard never calls it.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    value: RwLock<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an arbitrary raw value, malformed or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: RwLock::new(Some(raw.into())),
        }
    }

    pub fn write(&self, raw: impl Into<String>) {
        *self.value.write().unwrap_or_else(|e| e.into_inner()) = Some(raw.into());
    }

    pub fn sign_in(&self, record: &SessionRecord) {
        self.write(record.encode());
    }

    pub fn clear(&self) {
        *self.value.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl SessionStore for MemorySessionStore {
    fn read(&self) -> Option<String> {
        self.value.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
