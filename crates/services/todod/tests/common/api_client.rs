use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

pub struct ApiClient {
    pub url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    fn path(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.url)
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> (StatusCode, Value) {
        let mut request = self.client.request(method, self.path(endpoint));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.expect("Failed to send http request");
        let status = response.status();
        let body = response.json().await.expect("Couldn't Parse Value");
        (status, body)
    }

    pub async fn get(&self, endpoint: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send::<()>(Method::GET, endpoint, token, None).await
    }

    pub async fn post<B: Serialize>(
        &self,
        endpoint: &str,
        token: Option<&str>,
        body: &B,
    ) -> (StatusCode, Value) {
        self.send(Method::POST, endpoint, token, Some(body)).await
    }

    pub async fn put<B: Serialize>(
        &self,
        endpoint: &str,
        token: Option<&str>,
        body: &B,
    ) -> (StatusCode, Value) {
        self.send(Method::PUT, endpoint, token, Some(body)).await
    }

    pub async fn delete(&self, endpoint: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send::<()>(Method::DELETE, endpoint, token, None).await
    }

    /// Posts a raw body with the given content type.
    pub async fn post_raw(
        &self,
        endpoint: &str,
        token: Option<&str>,
        content_type: &str,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let mut request = self
            .client
            .post(self.path(endpoint))
            .header("content-type", content_type)
            .body(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.expect("Failed to send http request");
        let status = response.status();
        (status, response.json().await.expect("Couldn't Parse Value"))
    }
}
