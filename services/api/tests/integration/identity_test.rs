use axum::{Json, Router, extract::FromRef, http::StatusCode, routing::get};
use axum_test::TestServer;
use serde::Serialize;
use uuid::Uuid;

use safereturn_auth_types::identity::{Identity, JwtSecret};
use safereturn_testing::auth::TestIdentity;

use crate::helpers::TEST_JWT_SECRET;

#[derive(Clone)]
struct TestState {
    jwt_secret: String,
}

impl FromRef<TestState> for JwtSecret {
    fn from_ref(state: &TestState) -> Self {
        JwtSecret(state.jwt_secret.clone())
    }
}

#[derive(Serialize)]
struct WhoAmI {
    user_id: Uuid,
    user_role: u8,
}

async fn whoami(identity: Identity) -> Json<WhoAmI> {
    Json(WhoAmI {
        user_id: identity.user_id,
        user_role: identity.user_role,
    })
}

fn test_server() -> TestServer {
    let router = Router::new()
        .route("/whoami", get(whoami))
        .with_state(TestState {
            jwt_secret: TEST_JWT_SECRET.to_owned(),
        });
    TestServer::new(router).unwrap()
}

#[tokio::test]
async fn should_authenticate_request_with_access_token_cookie() {
    let server = test_server();
    let identity = TestIdentity::admin(Uuid::now_v7());

    let response = server
        .get("/whoami")
        .add_header("cookie", identity.cookie(TEST_JWT_SECRET))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["user_id"], identity.user_id.to_string());
    assert_eq!(body["user_role"], 1);
}

#[tokio::test]
async fn should_reject_request_without_cookie() {
    let server = test_server();
    let response = server.get("/whoami").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_token_signed_with_wrong_secret() {
    let server = test_server();
    let identity = TestIdentity::user(Uuid::now_v7());

    let response = server
        .get("/whoami")
        .add_header("cookie", identity.cookie("some-other-secret"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
