use crate::core::http::HttpClient;
use crate::core::request::{HttpResponse, RequestDescriptor};
use crate::domain::error::CliResult;
use async_trait::async_trait;
use reqwest::Client;

/// `reqwest` backed HTTP client
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, request: &RequestDescriptor) -> CliResult<HttpResponse> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if request.json && request.header_value("accept").is_none() {
            builder = builder.header("accept", "application/json");
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
