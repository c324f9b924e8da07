//! Translation of rejected OData/JSON responses into user-facing errors.

use crate::core::request::HttpResponse;
use crate::domain::error::CliError;
use serde_json::Value;

/// Extract the most specific error message from a failed response
pub fn error_message(response: &HttpResponse) -> String {
    let body = response.body.trim();

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = message_from_json(&value) {
            return message;
        }
    }

    if body.is_empty() {
        format!("Request failed with status {}", response.status)
    } else {
        body.to_string()
    }
}

/// Build the error for a non-success response
pub fn rejection(response: &HttpResponse) -> CliError {
    CliError::Remote {
        status: response.status,
        message: error_message(response),
    }
}

fn message_from_json(value: &Value) -> Option<String> {
    // SharePoint: {"odata.error":{"message":{"lang":"en-US","value":"..."}}}
    if let Some(message) = value.pointer("/odata.error/message/value").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    // Graph: {"error":{"code":"...","message":"..."}}
    if let Some(message) = value.pointer("/error/message").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    if let Some(message) = value.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    // Azure AD token endpoint
    if let Some(message) = value.get("error_description").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    value.as_str().map(str::to_string)
}
