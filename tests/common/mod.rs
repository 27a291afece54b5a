use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use invodash::config::Config;
use invodash::db::Store;
use invodash::state::SharedState;

/// A running test server over the in-memory store. The client keeps
/// cookies, so a login carries over to later requests.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: SharedState,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// GET /seed.
    pub async fn seed(&self) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url("/seed"))
            .send()
            .await
            .expect("seed request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        (body, status)
    }

    /// POST the login form; the session cookie lands in the client jar.
    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/login"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        (body, status)
    }

    /// Seed the fixtures and sign in as the fixture user.
    pub async fn bootstrap(&self) {
        let (body, status) = self.seed().await;
        assert_eq!(status, StatusCode::OK, "seed failed: {body}");
        let (body, status) = self.login("user@nextmail.com", "123456").await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
    }

    /// GET a JSON endpoint with the current session.
    pub async fn get_json(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        (body, status)
    }

    /// POST the invoice form; returns the raw response so callers can
    /// inspect redirects.
    pub async fn create_invoice(
        &self,
        customer_id: &str,
        amount: &str,
        status: &str,
    ) -> reqwest::Response {
        self.client
            .post(self.url("/dashboard/invoices"))
            .form(&[("customerId", customer_id), ("amount", amount), ("status", status)])
            .send()
            .await
            .expect("create invoice request failed")
    }

    /// PUT the invoice form at /dashboard/invoices/{id}.
    pub async fn update_invoice(
        &self,
        id: &str,
        customer_id: &str,
        amount: &str,
        status: &str,
    ) -> reqwest::Response {
        self.client
            .put(self.url(&format!("/dashboard/invoices/{id}")))
            .form(&[("customerId", customer_id), ("amount", amount), ("status", status)])
            .send()
            .await
            .expect("update invoice request failed")
    }

    pub async fn delete_invoice(&self, id: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(&format!("/dashboard/invoices/{id}")))
            .send()
            .await
            .expect("delete invoice request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        (body, status)
    }

    /// Id of a seeded customer, found by name in the picker listing.
    pub async fn customer_id(&self, name: &str) -> String {
        let (body, status) = self.get_json("/dashboard/customers").await;
        assert_eq!(status, StatusCode::OK, "customer listing failed: {body}");
        body.as_array()
            .expect("customer listing is not an array")
            .iter()
            .find(|row| row["name"] == name)
            .unwrap_or_else(|| panic!("no customer named {name}"))["id"]
            .as_str()
            .expect("customer id is not a string")
            .to_string()
    }
}

/// Spawn a server on a random port over a fresh in-memory store.
pub async fn spawn_app() -> TestApp {
    let config = Config {
        mongo_uri: "mongodb://unused-in-tests".to_string(),
        db_name: "invodash_test".to_string(),
        session_secret: "test-session-secret-that-is-long-enough".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to a random port
        log_level: "warn".to_string(),
    };

    let (app, state) = invodash::build_app(Store::memory(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp { addr, client, state }
}
