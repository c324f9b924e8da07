use crate::core::auth::AuthProvider;
use crate::core::http::HttpClient;
use crate::core::odata;
use crate::core::request::RequestDescriptor;
use crate::domain::error::{CliError, CliResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// A single CLI command backed by Microsoft 365 REST APIs
#[async_trait]
pub trait O365Command: Send + Sync {
    /// Command name as typed on the command line
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Check the options; runs before any token or network activity
    fn validate(&self) -> CliResult<()>;

    /// Execute the command and return the body to print
    async fn execute(&self, ctx: &CommandContext) -> CliResult<String>;
}

/// Collaborators shared by commands during one invocation
#[derive(Clone)]
pub struct CommandContext {
    pub auth: Arc<dyn AuthProvider>,
    pub http: Arc<dyn HttpClient>,
}

impl CommandContext {
    pub fn new(auth: Arc<dyn AuthProvider>, http: Arc<dyn HttpClient>) -> Self {
        Self { auth, http }
    }

    /// Issue a request and return the raw body of a successful response
    pub async fn execute_request(&self, request: &RequestDescriptor) -> CliResult<String> {
        debug!(
            request = %serde_json::to_string(&request.redacted())?,
            "Executing web request"
        );

        let response = self.http.get(request).await?;
        debug!(status = response.status, body = %response.body, "Response");

        if !response.is_success() {
            return Err(odata::rejection(&response));
        }

        Ok(response.body)
    }

    /// Issue a request and deserialize the JSON body
    pub async fn execute_json<T: DeserializeOwned>(&self, request: &RequestDescriptor) -> CliResult<T> {
        let body = self.execute_request(request).await?;
        serde_json::from_str(&body).map_err(|e| {
            CliError::InvalidResponse(format!("Unexpected response from {}: {}", request.url, e))
        })
    }
}

/// Validate then execute a command
pub async fn run_command(command: &dyn O365Command, ctx: &CommandContext) -> CliResult<String> {
    command.validate()?;
    debug!(command = command.name(), "Options validated");
    command.execute(ctx).await
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::auth::ServiceConnection;
    use crate::core::request::HttpResponse;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Auth provider handing out `token-for:<resource>` tokens
    pub struct MockAuth {
        pub connection: ServiceConnection,
        pub calls: Mutex<Vec<String>>,
    }

    impl MockAuth {
        pub fn new(site_url: Option<&str>) -> Self {
            Self {
                connection: ServiceConnection {
                    graph_resource: "https://graph.microsoft.com".to_string(),
                    site_url: site_url.map(str::to_string),
                    refresh_token: Some("refresh".to_string()),
                    access_token_override: false,
                },
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AuthProvider for MockAuth {
        async fn connection(&self) -> ServiceConnection {
            self.connection.clone()
        }

        async fn ensure_access_token(&self, resource: &str) -> CliResult<String> {
            self.calls.lock().unwrap().push(format!("ensure:{}", resource));
            Ok(format!("token-for:{}", resource))
        }

        async fn get_access_token(&self, resource: &str, refresh_token: &str) -> CliResult<String> {
            self.calls.lock().unwrap().push(format!("get:{}:{}", resource, refresh_token));
            Ok(format!("token-for:{}", resource))
        }
    }

    /// HTTP client replaying queued responses and recording requests
    #[derive(Default)]
    pub struct MockHttp {
        pub responses: Mutex<VecDeque<HttpResponse>>,
        pub requests: Mutex<Vec<RequestDescriptor>>,
    }

    impl MockHttp {
        pub fn with_responses(responses: Vec<HttpResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<RequestDescriptor> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpClient for MockHttp {
        async fn get(&self, request: &RequestDescriptor) -> CliResult<HttpResponse> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| CliError::InvalidResponse("no response queued".to_string()))
        }
    }

    pub fn context(auth: Arc<MockAuth>, http: Arc<MockHttp>) -> CommandContext {
        CommandContext::new(auth, http)
    }
}
