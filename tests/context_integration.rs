use chrono::{Duration, Utc};
use mailup_client::auth::{TokenCache, CACHE_FILE_NAME};
use mailup_client::transport::Method;
use mailup_client::{MailupError, RequestContext, Token, TokenStatus};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::{CONSOLE, TOKEN_PATH};

async fn mount_lists(server: &MockServer, bearer: &str) {
    Mock::given(method("GET"))
        .and(path(format!("{CONSOLE}/User/Lists")))
        .and(header("Authorization", format!("Bearer {bearer}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page(serde_json::json!([]), 0)))
        .mount(server)
        .await;
}

fn lists_path() -> String {
    "/ConsoleService.svc/Console/User/Lists".to_string()
}

#[tokio::test]
async fn first_call_runs_password_grant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header(
            "Authorization",
            "Basic dGVzdF9jbGllbnRfaWQ6dGVzdF9jbGllbnRfc2VjcmV0",
        ))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=m12345"))
        .and(body_string_contains("password=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::token_body("at-1", 3600, "rt-1")))
        .expect(1)
        .mount(&server)
        .await;
    mount_lists(&server, "at-1").await;

    let mut ctx = common::context(&server);
    assert_eq!(ctx.token_status(), TokenStatus::Missing);

    let response = ctx.request(&lists_path(), Method::GET, None).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(ctx.token_status(), TokenStatus::Fresh);

    // The second call reuses the token: the grant mock expects one hit.
    ctx.request(&lists_path(), Method::GET, None).await.unwrap();
}

#[tokio::test]
async fn malformed_cache_behaves_like_empty_cache() {
    let server = MockServer::start().await;
    common::mount_password_grant(&server, "at-fresh").await;
    mount_lists(&server, "at-fresh").await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CACHE_FILE_NAME), "not json at all").unwrap();

    let mut ctx = RequestContext::new(common::options(&server, Some(dir.path()))).unwrap();
    assert_eq!(ctx.token_status(), TokenStatus::Missing);

    ctx.request(&lists_path(), Method::GET, None).await.unwrap();

    let cached = TokenCache::new(dir.path()).load().unwrap();
    assert_eq!(cached.access_token(), "at-fresh");
    assert_eq!(cached.refresh_token(), "rt-1");
}

#[tokio::test]
async fn cached_token_skips_authentication() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    mount_lists(&server, "at-cached").await;

    let dir = tempfile::tempdir().unwrap();
    let token = Token::new("at-cached", Utc::now() + Duration::seconds(3600), "rt-cached");
    TokenCache::new(dir.path()).save(&token).unwrap();

    let mut ctx = RequestContext::new(common::options(&server, Some(dir.path()))).unwrap();
    assert_eq!(ctx.token_status(), TokenStatus::Fresh);
    ctx.request(&lists_path(), Method::GET, None).await.unwrap();
}

#[tokio::test]
async fn token_close_to_expiry_is_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=rt-old"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::token_body("at-new", 3600, "rt-new")))
        .expect(1)
        .mount(&server)
        .await;
    mount_lists(&server, "at-new").await;

    let dir = tempfile::tempdir().unwrap();
    let token = Token::new("at-old", Utc::now() + Duration::seconds(100), "rt-old");
    TokenCache::new(dir.path()).save(&token).unwrap();

    let mut ctx = RequestContext::new(common::options(&server, Some(dir.path()))).unwrap();
    assert_eq!(ctx.token_status(), TokenStatus::RefreshDue);

    ctx.request(&lists_path(), Method::GET, None).await.unwrap();
    assert_eq!(ctx.token_status(), TokenStatus::Fresh);

    let cached = TokenCache::new(dir.path()).load().unwrap();
    assert_eq!(cached.access_token(), "at-new");
}

#[tokio::test]
async fn failed_grant_keeps_previous_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("{\"error\":\"boom\"}"))
        .mount(&server)
        .await;

    let mut ctx = common::context(&server);
    let err = ctx.request(&lists_path(), Method::GET, None).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err
        .to_string()
        .starts_with("Response not OK when requesting an access token. Status: 500."));
    assert!(err.to_string().contains("{\"error\":\"boom\"}"));
    assert_eq!(ctx.token_status(), TokenStatus::Missing);
}

#[tokio::test]
async fn api_error_is_not_retried() {
    let server = MockServer::start().await;
    common::mount_password_grant(&server, "at-1").await;
    Mock::given(method("GET"))
        .and(path(format!("{CONSOLE}/User/Lists")))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctx = common::context(&server);
    let err = ctx.request(&lists_path(), Method::GET, None).await.unwrap_err();

    match err {
        MailupError::InvalidResponse { response, message } => {
            assert_eq!(response.status, 401);
            assert_eq!(response.body, "unauthorized");
            assert!(message.contains("/ConsoleService.svc/Console/User/Lists"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn json_body_is_sent_with_bearer() {
    let server = MockServer::start().await;
    common::mount_password_grant(&server, "at-1").await;
    Mock::given(method("PUT"))
        .and(path(format!("{CONSOLE}/Recipient/Detail")))
        .and(header("Content-Type", "application/json"))
        .and(header("Authorization", "Bearer at-1"))
        .and(wiremock::matchers::body_json(serde_json::json!({"Email": "a@example.com"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctx = common::context(&server);
    ctx.request(
        "/ConsoleService.svc/Console/Recipient/Detail",
        Method::PUT,
        Some(serde_json::json!({"Email": "a@example.com"})),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn switching_cache_dir_picks_up_cached_token() {
    let server = MockServer::start().await;
    let mut ctx = common::context(&server);
    assert!(ctx.cache_dir().is_none());

    let dir = tempfile::tempdir().unwrap();
    let token = Token::new("at-cached", Utc::now() + Duration::seconds(3600), "rt");
    TokenCache::new(dir.path()).save(&token).unwrap();

    ctx.set_cache_dir(Some(dir.path().to_path_buf()));
    assert_eq!(ctx.cache_dir(), Some(dir.path()));
    assert_eq!(ctx.token_status(), TokenStatus::Fresh);

    let empty = tempfile::tempdir().unwrap();
    ctx.set_cache_dir(Some(empty.path().to_path_buf()));
    assert_eq!(ctx.token_status(), TokenStatus::Fresh);
}
