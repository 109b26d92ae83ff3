//! Common error types used across the page-fx crates
//!
//! Runtime behavior is fail-open and never produces these; they only surface
//! while a page is being set up.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for setup-time failures
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum PageFxError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: String,
        field: Option<String>,
    },

    #[error("Duplicate region key: {key}")]
    DuplicateRegionKey { key: String },

    #[error("Host object unavailable: {object}")]
    HostUnavailable { object: String },

    #[error("Page instance not found: {id}")]
    InstanceNotFound { id: String },

    #[error("JavaScript interop error: {message}")]
    JsInterop { message: String },
}

/// Result type alias for page-fx operations
pub type PageFxResult<T> = Result<T, PageFxError>;

/// Error response structure handed back to JavaScript
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: PageFxError,
    pub operation: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: PageFxError) -> Self {
        Self {
            success: false,
            error,
            operation: None,
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    /// Convert to JSON string for JavaScript
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"type":"JsInterop","details":{"message":"Failed to serialize error"}}}"#.to_string()
        })
    }
}

impl From<serde_json::Error> for PageFxError {
    fn from(err: serde_json::Error) -> Self {
        PageFxError::InvalidConfig {
            message: err.to_string(),
            field: None,
        }
    }
}

#[cfg(feature = "wasm")]
impl From<wasm_bindgen::JsValue> for PageFxError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        PageFxError::JsInterop {
            message: format!("{err:?}"),
        }
    }
}

#[cfg(feature = "wasm")]
impl From<PageFxError> for wasm_bindgen::JsValue {
    fn from(err: PageFxError) -> Self {
        wasm_bindgen::JsValue::from_str(&ErrorResponse::new(err).to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = PageFxError::DuplicateRegionKey {
            key: "liner".to_string(),
        };

        let json = ErrorResponse::new(error).with_operation("mount").to_json();
        assert!(json.contains("DuplicateRegionKey"));
        assert!(json.contains("liner"));
        assert!(json.contains("mount"));
    }

    #[test]
    fn test_error_conversion() {
        let parse_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: PageFxError = parse_err.into();

        match err {
            PageFxError::InvalidConfig { message, field } => {
                assert!(!message.is_empty());
                assert!(field.is_none());
            }
            _ => panic!("Wrong error variant"),
        }
    }
}
