#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use futures::future::BoxFuture;
use hiring_intake::db::{Application, IntakeStorage};
use hiring_intake::notify::{Notifier, NotifyError};
use hiring_intake::router::{IntakeState, intake_router};
use serde_json::Value;
use std::{
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "password123";

/// Notifier stub that records what it was handed and succeeds or fails on demand.
#[derive(Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    pub received: Mutex<Vec<Application>>,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    pub fn sent_to(&self) -> Vec<Option<String>> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .map(|a| a.email.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify<'a>(
        &'a self,
        application: &'a Application,
    ) -> BoxFuture<'a, Result<(), NotifyError>> {
        Box::pin(async move {
            self.received.lock().unwrap().push(application.clone());
            if self.fail {
                Err(NotifyError::NotConfigured)
            } else {
                Ok(())
            }
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub storage: IntakeStorage,
    pub notifier: Arc<RecordingNotifier>,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
    }
}

impl TestApp {
    pub async fn spawn(notifier: RecordingNotifier) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut db_path = std::env::temp_dir();
        db_path.push(format!(
            "hiring-intake-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));
        let database_url = format!("sqlite:{}", db_path.display());

        let storage = hiring_intake::db::connect(&database_url)
            .await
            .expect("failed to open test database");
        hiring_intake::auth::seed_admin(&storage, ADMIN_USER, ADMIN_PASSWORD)
            .await
            .expect("failed to seed admin");

        let notifier = Arc::new(notifier);
        let state = IntakeState::new(storage.clone(), notifier.clone());
        Self {
            router: intake_router(state),
            storage,
            notifier,
            db_path,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", token);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).expect("failed to build request"))
            .await
    }

    /// POST a raw body, with `content_type` only when given.
    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        self.send(
            builder
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let resp = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body was not json")
        };
        (status, json)
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            "POST",
            "/api/login",
            None,
            Some(serde_json::json!({ "username": username, "password": password })),
        )
        .await
    }

    pub async fn admin_token(&self) -> String {
        let (status, body) = self.login(ADMIN_USER, ADMIN_PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().expect("token missing").to_string()
    }

    pub async fn apply(&self, body: Value) -> (StatusCode, Value) {
        self.request("POST", "/api/apply", None, Some(body)).await
    }

    pub async fn list(&self, token: Option<&str>) -> (StatusCode, Value) {
        self.request("GET", "/api/applications", token, None).await
    }
}
