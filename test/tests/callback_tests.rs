//! Callback route tests: provider errors, missing code, full sign-in.


use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{callback, strategy_with, test_config, FakeUserInfoClient, Reply};

const BODY: &str = r#"{"sub": "111111111111111111111", "name": "First Last", "email": "example@gmail.com", "email_verified": true}"#;

async fn token_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("code=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "at-1",
            "token_type": "Bearer",
            "expires_in": 3599,
            "scope": "openid email"
        })))
        .mount(&server)
        .await;
    server
}

#[actix_web::test]
async fn test_callback_without_code_is_rejected() {
    let client = FakeUserInfoClient::new(Reply::Body(BODY.to_string()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(strategy_with(test_config(), client.clone())))
            .service(callback),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/auth/google/callback?state=xyz")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&body), "Missing authorization code");
    assert!(client.calls().is_empty());
}

#[actix_web::test]
async fn test_callback_provider_error_with_description() {
    let client = FakeUserInfoClient::new(Reply::Body(BODY.to_string()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(strategy_with(test_config(), client)))
            .service(callback),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/auth/google/callback?error=access_denied&error_description=User%20denied")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(
        String::from_utf8_lossy(&body),
        "OAuth2 error: access_denied (User denied)"
    );
}

#[actix_web::test]
async fn test_callback_signs_in() {
    let server = token_server().await;
    let client = FakeUserInfoClient::new(Reply::Body(BODY.to_string()));
    let config = test_config().token_url(format!("{}/token", server.uri()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(strategy_with(config, client.clone())))
            .service(callback),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/auth/google/callback?code=abc&state=xyz")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["state"], "xyz");
    assert_eq!(body["scopes"], json!(["openid", "email"]));
    assert_eq!(body["profile"]["provider"], "google");
    assert_eq!(body["profile"]["id"], "111111111111111111111");
    assert_eq!(body["profile"]["displayName"], "First Last");
    assert_eq!(body["profile"]["emails"][0]["value"], "example@gmail.com");
    assert_eq!(body["profile"]["emails"][0]["verified"], true);
    assert_eq!(client.calls()[0].1, "at-1");
}

#[actix_web::test]
async fn test_callback_renders_user_info_error() {
    let server = token_server().await;
    let client = FakeUserInfoClient::new(Reply::Status(
        401,
        r#"{"error": "invalid_request", "error_description": "Invalid Credentials"}"#.to_string(),
    ));
    let config = test_config().token_url(format!("{}/token", server.uri()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(strategy_with(config, client)))
            .service(callback),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/auth/google/callback?code=abc")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid Credentials");
}
