mod common;

use backup_core::Application;
use backup_engine::{create_session, FailureKind, SessionSettings};
use common::{credentials, init_logging, job_for, json, login, status_body};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_sends_form_credentials() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=admin%40example.com"))
        .and(body_string_contains("password=secret"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let job = job_for(&server, Application::Jira);
    create_session(&job, &credentials(), &SessionSettings::default())
        .await
        .expect("login ok");
}

#[tokio::test]
async fn non_200_login_is_auth_error() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let job = job_for(&server, Application::Jira);
    let err = create_session(&job, &credentials(), &SessionSettings::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Auth { status: 401 });
    assert_eq!(err.message, "Session creation failed (HTTP 401)");
}

#[tokio::test]
async fn redirect_to_success_page_counts_as_login() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/home"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let job = job_for(&server, Application::Jira);
    assert!(create_session(&job, &credentials(), &SessionSettings::default())
        .await
        .is_ok());
}

#[tokio::test]
async fn login_cookie_is_reused_by_later_requests() {
    let server = MockServer::start().await;
    let job = job_for(&server, Application::Confluence);
    Mock::given(method("GET"))
        .and(path("/wiki/rest/obm/1.0/getprogress.json"))
        .and(header("cookie", "JSESSIONID=abc123"))
        .respond_with(json(status_body("1%")))
        .expect(1)
        .mount(&server)
        .await;

    let session = login(&server, &job).await;
    let err = backup_engine::download(
        &session,
        &job,
        &backup_engine::DownloadSettings::new(std::env::temp_dir()),
        &backup_engine::NullProgressSink,
    )
    .await
    .unwrap_err();
    // Status answered only because the cookie matched; the job is still running.
    assert_eq!(err.kind, FailureKind::MissingFileName);
}
