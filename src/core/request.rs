use serde::Serialize;
use std::collections::BTreeMap;

/// Accept header for Microsoft Graph requests
pub const GRAPH_ACCEPT: &str = "application/json;odata.metadata=none";
/// Accept header for SharePoint REST requests
pub const SPO_ACCEPT: &str = "application/json;odata=nometadata";

/// User agent sent with every request
pub fn user_agent() -> String {
    format!("NONISV|SharePointPnP|o365cli/{}", env!("CARGO_PKG_VERSION"))
}

/// Request descriptor built per call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestDescriptor {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// Request and response bodies are JSON
    pub json: bool,
}

impl RequestDescriptor {
    /// Create a GET request descriptor with the default headers
    pub fn get(url: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("user-agent".to_string(), user_agent());

        Self {
            url: url.into(),
            headers,
            json: true,
        }
    }

    pub fn bearer(self, access_token: &str) -> Self {
        self.header("authorization", format!("Bearer {}", access_token))
    }

    pub fn accept(self, value: &str) -> Self {
        self.header("accept", value)
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_lowercase(), value.into());
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Copy suitable for logging, with the bearer token masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if let Some(value) = copy.headers.get_mut("authorization") {
            *value = "Bearer ***".to_string();
        }
        copy
    }
}

/// Raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
