//! Storefront tests
//!
//! Session behaviour is exercised against small axum servers bound to
//! ephemeral ports, and once against the real gateway router.

#[cfg(test)]
mod fixtures {
    use std::sync::Arc;

    use axum::Router;
    use chrono::Utc;
    use platform::crypto::to_base64url;
    use serde_json::{Value, json};

    use crate::api::ApiClient;
    use crate::config::StorefrontConfig;
    use crate::session::{HistoryNavigator, SessionManager, TOKEN_STORAGE_KEY};
    use crate::storage::{KeyValueStorage, MemoryStorage};

    pub type TestSession = SessionManager<MemoryStorage, HistoryNavigator>;

    pub struct Harness {
        pub session: TestSession,
        pub storage: Arc<MemoryStorage>,
        pub navigator: Arc<HistoryNavigator>,
    }

    /// Serve `router` on 127.0.0.1 and return its base URL.
    pub async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Session against `base_url`, with `stored` already in storage.
    pub fn harness(base_url: &str, stored: Option<&str>) -> Harness {
        let storage = Arc::new(MemoryStorage::new());
        if let Some(token) = stored {
            storage.set_item(TOKEN_STORAGE_KEY, token).unwrap();
        }
        let navigator = Arc::new(HistoryNavigator::new());
        let api = ApiClient::new(&StorefrontConfig::with_base_url(base_url)).unwrap();
        Harness {
            session: SessionManager::new(api, storage.clone(), navigator.clone()),
            storage,
            navigator,
        }
    }

    /// Unsigned token; the client never checks signatures.
    pub fn token_with_payload(payload: Value) -> String {
        let header = to_base64url(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = to_base64url(payload.to_string().as_bytes());
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    pub fn token_expiring_at(exp: i64) -> String {
        token_with_payload(json!({ "sub": "42", "email": "a@b.com", "exp": exp }))
    }

    pub fn live_token() -> String {
        token_expiring_at(Utc::now().timestamp() + 3600)
    }

    pub fn expired_token() -> String {
        token_expiring_at(Utc::now().timestamp() - 60)
    }

    pub fn stored(storage: &MemoryStorage) -> Option<String> {
        storage.get_item(TOKEN_STORAGE_KEY).unwrap()
    }
}

#[cfg(test)]
mod restore_tests {
    use std::time::Duration;

    use chrono::Utc;
    use serde_json::json;

    use super::fixtures::*;
    use crate::error::SessionError;

    // Nothing listens here; these tests never hit the network
    const OFFLINE: &str = "http://127.0.0.1:9";

    #[test]
    fn test_no_token_means_logged_out() {
        let h = harness(OFFLINE, None);
        assert!(!h.session.is_logged_in().get());
        assert_eq!(h.session.token(), None);
        assert!(h.session.user_details().unwrap().is_none());
    }

    #[test]
    fn test_live_token_restores_session() {
        let h = harness(OFFLINE, Some(&live_token()));
        assert!(h.session.is_logged_in().get());

        let user = h.session.user().get().unwrap();
        assert_eq!(user.subject().as_deref(), Some("42"));
        assert_eq!(user.email(), Some("a@b.com"));
    }

    #[test]
    fn test_loosely_shaped_tokens_restore_session() {
        let exp = Utc::now().timestamp() + 3600;
        let payloads = [
            json!({ "_id": "5a1", "email": "a@b.com", "exp": exp }),
            json!({ "sub": "1", "exp": exp, "role": "manager" }),
            json!({ "sub": "1", "exp": exp as f64 + 0.5 }),
        ];

        for payload in payloads {
            let h = harness(OFFLINE, Some(&token_with_payload(payload.clone())));
            assert!(h.session.is_logged_in().get(), "{payload}");
            assert!(h.session.user_details().unwrap().is_some(), "{payload}");
        }

        let h = harness(OFFLINE, Some(&token_with_payload(json!({ "_id": "5a1" }))));
        assert!(!h.session.is_logged_in().get());
        assert_eq!(h.session.user().get().unwrap().subject().as_deref(), Some("5a1"));
    }

    #[test]
    fn test_expired_token_is_logged_out() {
        let h = harness(OFFLINE, Some(&expired_token()));
        assert!(!h.session.is_logged_in().get());
        // The claims are still readable
        assert!(h.session.user().get().is_some());
    }

    #[test]
    fn test_malformed_token() {
        let h = harness(OFFLINE, Some("not-a-token"));
        assert!(!h.session.is_logged_in().get());
        assert!(h.session.user().get().is_none());
        assert!(matches!(
            h.session.user_details(),
            Err(SessionError::MalformedToken(_))
        ));

        let h = harness(OFFLINE, Some("a.bm90IGpzb24.c"));
        assert!(matches!(
            h.session.user_details(),
            Err(SessionError::MalformedToken(_))
        ));
    }

    #[tokio::test]
    async fn test_login_state_is_derived_once() {
        let h = harness(OFFLINE, Some(&token_expiring_at(Utc::now().timestamp() + 1)));
        assert!(h.session.is_logged_in().get());

        tokio::time::sleep(Duration::from_millis(2100)).await;

        // Still the value computed at construction
        assert!(h.session.is_logged_in().get());
        assert!(!h.session.refresh_login_state());
        assert!(!h.session.is_logged_in().get());
    }

    #[test]
    fn test_save_token_updates_cache_and_storage() {
        let h = harness(OFFLINE, None);
        h.session.save_token("a.b.c").unwrap();
        assert_eq!(h.session.token().as_deref(), Some("a.b.c"));
        assert_eq!(stored(&h.storage).as_deref(), Some("a.b.c"));
    }
}

#[cfg(test)]
mod logout_tests {
    use std::sync::{Arc, Mutex};

    use super::fixtures::*;
    use crate::session::LOGIN_ROUTE;

    const OFFLINE: &str = "http://127.0.0.1:9";

    #[test]
    fn test_logout_clears_everything() {
        let h = harness(OFFLINE, Some(&live_token()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        h.session
            .is_logged_in()
            .subscribe(move |v: &bool| sink.lock().unwrap().push(*v));

        h.session.logout().unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
        assert_eq!(h.session.token(), None);
        assert_eq!(stored(&h.storage), None);
        assert!(h.session.user().get().is_none());
        assert_eq!(h.navigator.current().as_deref(), Some(LOGIN_ROUTE));
    }

    #[test]
    fn test_logout_when_already_logged_out() {
        let h = harness(OFFLINE, None);
        h.session.logout().unwrap();
        h.session.logout().unwrap();
        assert!(!h.session.is_logged_in().get());
        assert_eq!(h.navigator.history(), vec![LOGIN_ROUTE, LOGIN_ROUTE]);
    }
}

#[cfg(test)]
mod request_tests {
    use std::sync::{Arc, Mutex};

    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use super::fixtures::*;
    use crate::api::{Credentials, Endpoint};
    use crate::error::SessionError;
    use crate::session::LOGIN_ROUTE;

    #[tokio::test]
    async fn test_register_saves_token_and_logs_in() {
        let received = Arc::new(Mutex::new(Value::Null));
        let sink = Arc::clone(&received);
        let app = Router::new().route(
            "/api/user/register",
            post(move |Json(body): Json<Value>| {
                let sink = Arc::clone(&sink);
                async move {
                    *sink.lock().unwrap() = body;
                    Json(json!({ "token": "T", "success": true }))
                }
            }),
        );
        let h = harness(&serve(app).await, None);

        let response = h
            .session
            .register(&Credentials::new("a@b.com", "x"))
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(stored(&h.storage).as_deref(), Some("T"));
        assert_eq!(h.session.token().as_deref(), Some("T"));
        assert!(h.session.is_logged_in().get());
        assert_eq!(
            *received.lock().unwrap(),
            json!({ "email": "a@b.com", "password": "x" })
        );
    }

    #[tokio::test]
    async fn test_refused_login_keeps_token() {
        let app = Router::new().route(
            "/api/user/login",
            post(|| async { Json(json!({ "success": false, "message": "nope" })) }),
        );
        let original = live_token();
        let h = harness(&serve(app).await, Some(&original));
        assert!(h.session.is_logged_in().get());

        let response = h
            .session
            .login(&Credentials::new("a@b.com", "x"))
            .await
            .unwrap();

        assert!(!response.is_success());
        assert!(!h.session.is_logged_in().get());
        assert_eq!(h.session.token(), Some(original.clone()));
        assert_eq!(stored(&h.storage), Some(original));
        assert!(h.navigator.history().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_login_is_status_error() {
        let app = Router::new().route(
            "/api/user/login",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "success": false, "message": "Invalid email or password" })),
                )
            }),
        );
        let h = harness(&serve(app).await, None);

        let err = h
            .session
            .login(&Credentials::new("a@b.com", "x"))
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), Some("Invalid email or password"));
        assert!(!h.session.is_logged_in().get());
    }

    #[tokio::test]
    async fn test_failed_register_forces_logout() {
        let app = Router::new().route(
            "/api/user/register",
            post(|| async {
                (
                    StatusCode::CONFLICT,
                    Json(json!({ "success": false, "message": "taken" })),
                )
            }),
        );
        let h = harness(&serve(app).await, Some(&live_token()));

        let err = h
            .session
            .register(&Credentials::new("a@b.com", "x"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(409));
        assert!(!h.session.is_logged_in().get());
        assert_eq!(stored(&h.storage), None);
        assert_eq!(h.navigator.current().as_deref(), Some(LOGIN_ROUTE));
    }

    #[tokio::test]
    async fn test_refused_register_forces_logout() {
        let app = Router::new().route(
            "/api/user/register",
            post(|| async { Json(json!({ "success": false })) }),
        );
        let h = harness(&serve(app).await, Some(&live_token()));

        let response = h
            .session
            .register(&Credentials::new("a@b.com", "x"))
            .await
            .unwrap();

        assert!(!response.is_success());
        assert_eq!(stored(&h.storage), None);
        assert!(h.session.user().get().is_none());
    }

    #[tokio::test]
    async fn test_protected_calls_send_bearer() {
        async fn echo_auth(headers: HeaderMap) -> Json<Value> {
            let auth = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            Json(json!({ "message": "get profile", "payload": { "auth": auth } }))
        }
        let app = Router::new()
            .route("/api/user/profile", get(echo_auth))
            .route("/api/admin-auth", get(echo_auth))
            .route("/api/user/login", post(echo_auth));
        let token = live_token();
        let h = harness(&serve(app).await, Some(&token));

        let response = h.session.profile().await.unwrap();
        assert_eq!(
            response.field("payload").unwrap()["auth"],
            format!("Bearer {token}")
        );

        let response = h.session.admin_auth().await.unwrap();
        assert_eq!(
            response.field("payload").unwrap()["auth"],
            format!("Bearer {token}")
        );

        // Credentials endpoints never carry the old token
        let response = h
            .session
            .request(Endpoint::Login, Some(&Credentials::new("a@b.com", "x")))
            .await
            .unwrap();
        assert!(response.field("payload").unwrap()["auth"].is_null());
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let app = Router::new().route("/api/user/profile", get(|| async { "<html>oops</html>" }));
        let h = harness(&serve(app).await, Some(&live_token()));

        assert!(matches!(
            h.session.profile().await,
            Err(SessionError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_error_body_need_not_be_json() {
        let app = Router::new().route(
            "/api/user/profile",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let h = harness(&serve(app).await, Some(&live_token()));

        match h.session.profile().await {
            Err(SessionError::Status { status, response }) => {
                assert_eq!(status, 502);
                assert!(response.is_none());
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Grab a free port, then close it
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let h = harness(&format!("http://{addr}"), None);
        let err = h
            .session
            .login(&Credentials::new("a@b.com", "x"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Transport(_)));
        assert!(!h.session.is_logged_in().get());
    }
}

#[cfg(test)]
mod ordering_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use tokio::sync::Notify;

    use super::fixtures::*;
    use crate::api::Credentials;
    use crate::error::SessionError;

    #[tokio::test]
    async fn test_login_after_logout_does_not_resurrect_session() {
        let release = Arc::new(Notify::new());
        let gate = Arc::clone(&release);
        let fresh = live_token();
        let app = Router::new().route(
            "/api/user/login",
            post(move || {
                let gate = Arc::clone(&gate);
                let fresh = fresh.clone();
                async move {
                    gate.notified().await;
                    Json(json!({ "success": true, "token": fresh }))
                }
            }),
        );
        let h = harness(&serve(app).await, None);

        let credentials = Credentials::new("a@b.com", "x");
        let login = h.session.login(&credentials);
        let reset = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            h.session.logout().unwrap();
            release.notify_one();
        };
        let (result, ()) = tokio::join!(login, reset);

        assert!(matches!(result, Err(SessionError::Superseded)));
        assert!(!h.session.is_logged_in().get());
        assert_eq!(h.session.token(), None);
        assert_eq!(stored(&h.storage), None);
        assert!(h.session.user().get().is_none());
    }

    #[tokio::test]
    async fn test_requests_after_logout_proceed_normally() {
        let app = Router::new().route(
            "/api/user/login",
            post(|| async { Json(json!({ "success": true, "token": "a.b.c" })) }),
        );
        let h = harness(&serve(app).await, None);

        h.session.logout().unwrap();
        let response = h
            .session
            .login(&Credentials::new("a@b.com", "x"))
            .await
            .unwrap();

        assert!(response.is_success());
        assert!(h.session.is_logged_in().get());
        assert_eq!(stored(&h.storage).as_deref(), Some("a.b.c"));
    }
}

#[cfg(test)]
mod gateway_tests {
    use auth::{AuthAppState, AuthConfig, MemoryUserRepository, api_router};
    use kernel::role::UserRole;
    use orders::{MemoryOrderRepository, OrdersConfig, orders_router};

    use super::fixtures::*;
    use crate::api::Credentials;

    async fn gateway() -> String {
        let state = AuthAppState::new(MemoryUserRepository::new(), AuthConfig::with_random_secret());
        let orders = orders_router(MemoryOrderRepository::new(), OrdersConfig::default());
        serve(api_router(state, orders)).await
    }

    #[tokio::test]
    async fn test_full_session_against_gateway() {
        let h = harness(&gateway().await, None);
        let credentials = Credentials::new("Ada@Example.com", "Correct-Horse-42").with_name("Ada");

        let response = h.session.register(&credentials).await.unwrap();
        assert!(response.is_success());
        assert!(h.session.is_logged_in().get());

        let user = h.session.user().get().unwrap();
        assert_eq!(user.email(), Some("ada@example.com"));
        assert_eq!(user.name(), Some("Ada"));
        assert_eq!(user.role(), Some(UserRole::Customer));
        let subject = user.subject().unwrap();

        let profile = h.session.profile().await.unwrap();
        assert_eq!(profile.message.as_deref(), Some("get profile"));
        assert_eq!(profile.field("payload").unwrap()["sub"], subject.as_str());

        let err = h.session.admin_auth().await.unwrap_err();
        assert_eq!(err.status(), Some(403));

        h.session.logout().unwrap();
        assert!(h.session.profile().await.unwrap_err().is_unauthorized());

        let wrong = Credentials::new("ada@example.com", "Wrong-Horse-42");
        assert!(h.session.login(&wrong).await.unwrap_err().is_unauthorized());
        assert!(!h.session.is_logged_in().get());

        let right = Credentials::new("ada@example.com", "Correct-Horse-42");
        assert!(h.session.login(&right).await.unwrap().is_success());
        assert!(h.session.is_logged_in().get());
        assert_eq!(h.session.user().get().unwrap().subject(), Some(subject));
    }

    #[tokio::test]
    async fn test_tampered_token_is_rejected_by_gateway() {
        // Well-formed and unexpired, but not signed by this gateway
        let h = harness(&gateway().await, Some(&live_token()));
        assert!(h.session.is_logged_in().get());

        let err = h.session.profile().await.unwrap_err();
        assert!(err.is_unauthorized());
    }
}
