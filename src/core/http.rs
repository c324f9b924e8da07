use crate::core::request::{HttpResponse, RequestDescriptor};
use crate::domain::error::CliResult;
use async_trait::async_trait;

/// HTTP transport used by commands
///
/// Implementations return every response, success or not; status handling
/// belongs to the caller.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, request: &RequestDescriptor) -> CliResult<HttpResponse>;
}
