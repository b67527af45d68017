use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use identity_service::credential::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryCredentialRepository;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const PASSWORD: &str = "Str0ng!Pass";

/// Test application that spawns a real server over the in-memory store
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryCredentialRepository>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryCredentialRepository::new());

        // Cheap hashing cost keeps the suite fast
        let hasher = PasswordHasher::with_params(1024, 1, 1).expect("Invalid argon2 params");
        let authenticator =
            Arc::new(Authenticator::new(JWT_SECRET).with_password_hasher(hasher));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));

        let router = create_router(auth_service, authenticator, false);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a client account and return the parsed response body
    pub async fn register(&self, email: &str) -> (reqwest::StatusCode, Value) {
        let response = self
            .post("/api/v1/auth/register")
            .json(&registration_body(email))
            .send()
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body = response.json().await.expect("Failed to parse response");
        (status, body)
    }

    /// Log in and return the parsed response body
    pub async fn login(&self, email: &str, password: &str) -> (reqwest::StatusCode, Value) {
        let response = self
            .post("/api/v1/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body = response.json().await.expect("Failed to parse response");
        (status, body)
    }
}

pub fn registration_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": PASSWORD,
        "firstName": "Awa",
        "lastName": "Kone",
        "phone": "+225 07 01 02 03 04",
        "profileType": "CLIENT",
        "country": "CI"
    })
}
