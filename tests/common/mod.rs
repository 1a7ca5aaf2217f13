use std::path::Path;

use mailup_client::{ContextOptions, RequestContext};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_PATH: &str = "/Authorization/OAuth/Token";
pub const API_ROOT: &str = "/API/v1.1/Rest";
pub const CONSOLE: &str = "/API/v1.1/Rest/ConsoleService.svc/Console";

/// Options pointing both endpoints at the mock server.
#[allow(dead_code)]
pub fn options(server: &MockServer, cache_dir: Option<&Path>) -> ContextOptions {
    let options = ContextOptions::new("test_client_id", "test_client_secret", "m12345", "secret")
        .endpoints(
            format!("{}{TOKEN_PATH}", server.uri()),
            format!("{}{API_ROOT}", server.uri()),
        );
    match cache_dir {
        Some(dir) => options.cache_dir(dir),
        None => options,
    }
}

#[allow(dead_code)]
pub fn context(server: &MockServer) -> RequestContext {
    RequestContext::new(options(server, None)).unwrap()
}

#[allow(dead_code)]
pub fn token_body(access: &str, expires_in: i64, refresh: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": access,
        "expires_in": expires_in,
        "refresh_token": refresh,
    })
}

/// Answer password grants with a one-hour token named `access`.
#[allow(dead_code)]
pub async fn mount_password_grant(server: &MockServer, access: &str) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(access, 3600, "rt-1")))
        .mount(server)
        .await;
}

/// JSON page envelope used by the collection endpoints.
#[allow(dead_code)]
pub fn page(items: serde_json::Value, total: i64) -> serde_json::Value {
    serde_json::json!({
        "IsPaginated": true,
        "Items": items,
        "PageNumber": 0,
        "PageSize": 20,
        "Skipped": 0,
        "TotalElementsCount": total,
    })
}
