// src/error.rs

//! Unified error handling for the search application.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::models::Source;

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// A failed upstream call.
///
/// `status == 0` means no response was received at all (DNS, connection
/// refused, transport timeout). Any other value is the upstream HTTP status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("upstream {status} for {path}")]
pub struct GatewayError {
    pub status: u16,
    pub path: String,
}

impl GatewayError {
    /// Failure where no response was received.
    pub fn unreachable(path: impl Into<String>) -> Self {
        Self {
            status: 0,
            path: path.into(),
        }
    }

    pub fn is_unreachable(&self) -> bool {
        self.status == 0
    }
}

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Upstream content provider call failed
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Upstream body did not match the expected shape
    #[error("Decode error for {path}: {message}")]
    Decode { path: String, message: String },

    /// Well-formed reference that resolves to no record
    #[error("Not found: {0}")]
    NotFound(String),

    /// A source lookup exceeded its deadline
    #[error("{lookup} lookup timed out after {after:?}")]
    Timeout { lookup: Source, after: Duration },

    /// Both search sources failed for one aggregate call
    #[error("Both sources failed (quran: {quran}; hadith: {hadith})")]
    DualSourceFailure {
        quran: Box<AppError>,
        hadith: Box<AppError>,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a decode error for an upstream path.
    pub fn decode(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Combine the two per-source reasons of a failed aggregate call.
    pub fn dual(quran: AppError, hadith: AppError) -> Self {
        Self::DualSourceFailure {
            quran: Box::new(quran),
            hadith: Box::new(hadith),
        }
    }

    /// Upstream HTTP status when this is a gateway failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Gateway(e) => Some(e.status),
            _ => None,
        }
    }

    /// Upstream path involved in the failure, if known.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Gateway(e) => Some(&e.path),
            Self::Decode { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Turn an upstream 404 into a `NotFound` for the given reference.
    pub fn not_found_on_404(self, what: impl Into<String>) -> Self {
        match self {
            Self::Gateway(GatewayError { status: 404, .. }) => Self::NotFound(what.into()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_exposed_for_gateway_failures() {
        let err = AppError::from(GatewayError {
            status: 429,
            path: "/hadiths".into(),
        });
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.path(), Some("/hadiths"));
        assert_eq!(AppError::not_found("2:300").status(), None);
    }

    #[test]
    fn dual_failure_keeps_both_reasons() {
        let err = AppError::dual(
            GatewayError::unreachable("/api/search").into(),
            GatewayError {
                status: 429,
                path: "hadiths".into(),
            }
            .into(),
        );

        match err {
            AppError::DualSourceFailure { quran, hadith } => {
                assert_eq!(quran.status(), Some(0));
                assert_eq!(hadith.status(), Some(429));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn only_404_becomes_not_found() {
        let missing = AppError::from(GatewayError {
            status: 404,
            path: "/api/quran/2/300".into(),
        })
        .not_found_on_404("verse 2:300");
        assert!(matches!(missing, AppError::NotFound(_)));

        let server = AppError::from(GatewayError {
            status: 500,
            path: "/api/quran/2/3".into(),
        })
        .not_found_on_404("verse 2:3");
        assert_eq!(server.status(), Some(500));
    }
}
