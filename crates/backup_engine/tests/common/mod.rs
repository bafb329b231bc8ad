#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use backup_core::{Application, BackupJob};
use backup_engine::{
    create_session, AuthenticatedSession, Credentials, EngineEvent, Pacer, ProgressSink,
    SessionSettings,
};
use backup_logging::StageLog;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default, Clone)]
pub struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Records requested pauses and returns immediately.
#[derive(Default, Clone)]
pub struct RecordingPacer {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingPacer {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}

#[derive(Default, Clone)]
pub struct RecordingStageLog {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingStageLog {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl StageLog for RecordingStageLog {
    fn record(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub fn job_for(server: &MockServer, application: Application) -> BackupJob {
    BackupJob::with_base_url(application, &server.uri())
}

pub fn credentials() -> Credentials {
    Credentials::new("admin@example.com", "secret")
}

pub fn init_logging() {
    backup_logging::initialize_for_tests();
}

pub async fn mount_login(server: &MockServer) {
    init_logging();
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Set-Cookie", "JSESSIONID=abc123; Path=/"),
        )
        .mount(server)
        .await;
}

pub async fn login(server: &MockServer, job: &BackupJob) -> AuthenticatedSession {
    mount_login(server).await;
    create_session(job, &credentials(), &SessionSettings::default())
        .await
        .expect("login ok")
}

pub fn status_body(label: &str) -> String {
    format!(r#"{{"alternativePercentage":"{label}","size":0}}"#)
}

pub fn finished_body(file_name: &str) -> String {
    format!(r#"{{"alternativePercentage":"100%","fileName":"{file_name}"}}"#)
}

pub fn json(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/json")
}
