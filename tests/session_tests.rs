use axum::http::{HeaderMap, HeaderValue, header};
use axum_extra::extract::cookie::CookieJar;
use recordatorios_web::{
    MemorySessionStore, RequestSessionStore, SessionStore, error::SessionError,
    models::SessionRecord,
};

#[cfg(test)]
mod decode_tests {
    use super::*;

    #[test]
    fn test_decode_full_record() {
        let record = SessionRecord::decode(
            r#"{"uid":"u-1","email":"ana@example.com","displayName":"Ana"}"#,
        )
        .unwrap()
        .unwrap();

        assert_eq!(record.uid, "u-1");
        assert_eq!(record.email.as_deref(), Some("ana@example.com"));
        assert_eq!(record.display_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_decode_ignores_provider_extra_fields() {
        // The auth provider's user object carries much more than we read.
        let raw = r#"{"uid":"u-1","emailVerified":true,"providerData":[],"stsTokenManager":{"expirationTime":1}}"#;

        let record = SessionRecord::decode(raw).unwrap().unwrap();

        assert_eq!(record.uid, "u-1");
        assert_eq!(record.email, None);
    }

    #[test]
    fn test_decode_null_is_no_session() {
        assert!(SessionRecord::decode("null").unwrap().is_none());
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(matches!(
            SessionRecord::decode("not-json"),
            Err(SessionError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_rejects_blank_uid() {
        assert!(matches!(
            SessionRecord::decode(r#"{"uid":"  "}"#),
            Err(SessionError::MissingUid)
        ));
    }

    #[test]
    fn test_encode_then_current_returns_record() {
        let record = SessionRecord {
            uid: "u-2".to_string(),
            email: None,
            display_name: Some("Luis".to_string()),
        };
        let store = MemorySessionStore::new();
        store.sign_in(&record);

        assert!(store.read().unwrap().contains(r#""displayName":"Luis""#));
        assert_eq!(store.current(), Some(record));
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemorySessionStore::new();
        assert_eq!(store.read(), None);
        assert_eq!(store.current(), None);

        store.write("not-json");
        assert_eq!(store.read().as_deref(), Some("not-json"));
        assert_eq!(store.current(), None);

        store.write(r#"{"uid":"u-3"}"#);
        assert_eq!(store.current().map(|r| r.uid), Some("u-3".to_string()));

        store.clear();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_request_store_from_raw() {
        assert_eq!(RequestSessionStore::from_raw(None).current(), None);
        assert_eq!(
            RequestSessionStore::from_raw(Some("garbage".to_string())).current(),
            None
        );
        assert!(
            RequestSessionStore::from_raw(Some(r#"{"uid":"u-4"}"#.to_string()))
                .current()
                .is_some()
        );
    }

    #[test]
    fn test_request_store_reads_percent_encoded_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; user=%7B%22uid%22%3A%22u-5%22%7D"),
        );
        let jar = CookieJar::from_headers(&headers);

        let store = RequestSessionStore::from_cookies(&jar, "user");

        assert_eq!(store.read().as_deref(), Some(r#"{"uid":"u-5"}"#));
        assert_eq!(store.current().map(|r| r.uid), Some("u-5".to_string()));
    }

    #[test]
    fn test_request_store_missing_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        let jar = CookieJar::from_headers(&headers);

        assert_eq!(RequestSessionStore::from_cookies(&jar, "user").read(), None);
    }

    #[test]
    fn test_store_is_usable_behind_references() {
        let store = MemorySessionStore::with_raw(r#"{"uid":"u-6"}"#);
        let by_ref: &dyn SessionStore = &store;

        assert!(by_ref.current().is_some());
        assert!((&store).current().is_some());
    }
}
