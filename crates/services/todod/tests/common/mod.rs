#![allow(dead_code)]

use std::time::Duration;

use api_client::ApiClient;
use chrono::TimeDelta;
use todo_models::db::connection::DbConnection;
use todo_sdk::{
    role::UserRole,
    user::{UserApi, UserLoginRequest, UserSignup},
};
use todo_web::auth_token::TokenService;
use todod::{api::router, state::AppState};

pub mod api_client;

pub const PASSWORD: &str = "pw";

pub fn token_service() -> TokenService {
    TokenService::new(
        b"test-access-secret",
        b"test-refresh-secret",
        TimeDelta::hours(1),
        TimeDelta::hours(2),
    )
}

/// Starts the router on an ephemeral port over a fresh in-memory store.
pub async fn spawn_app() -> ApiClient {
    let connection = DbConnection::in_memory(Duration::from_secs(5));
    let app = router(AppState::new(connection, token_service()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    ApiClient::new(format!("http://{addr}"))
}

pub fn signup_body(email: &str, phone: &str, role: UserRole) -> UserSignup {
    UserSignup {
        first_name: String::from("Ada"),
        last_name: String::from("Lovelace"),
        email: email.to_string(),
        password: PASSWORD.to_string(),
        phone: phone.to_string(),
        user_type: role,
    }
}

/// Signs up and logs in, returning the logged in user with its tokens.
pub async fn register(api: &ApiClient, email: &str, phone: &str, role: UserRole) -> UserApi {
    let (status, _) = api
        .post("users/signup", None, &signup_body(email, phone, role))
        .await;
    assert!(status.is_success(), "signup of {email} failed with {status}");

    let (status, body) = api
        .post("users/login", None, &UserLoginRequest::new(email, PASSWORD))
        .await;
    assert!(status.is_success(), "login of {email} failed with {status}");
    serde_json::from_value(body["data"].clone()).expect("Login response is not a user")
}

pub fn token(user: &UserApi) -> Option<&str> {
    user.token.as_deref()
}
