//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use reqwest::Error as HttpError;
use resplan_domain::ResplanError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ResplanError);

impl From<InfraError> for ResplanError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ResplanError> for InfraError {
    fn from(value: ResplanError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoResplanError {
    fn into_resplan(self) -> ResplanError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → ResplanError */
/* -------------------------------------------------------------------------- */

impl IntoResplanError for IoError {
    fn into_resplan(self) -> ResplanError {
        match self.kind() {
            ErrorKind::NotFound => ResplanError::NotFound(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => {
                ResplanError::Persistence(format!("permission denied: {self}"))
            }
            _ => ResplanError::Persistence(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        Self(value.into_resplan())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → ResplanError */
/* -------------------------------------------------------------------------- */

impl IntoResplanError for JsonError {
    fn into_resplan(self) -> ResplanError {
        use serde_json::error::Category;

        match self.classify() {
            Category::Io => ResplanError::Persistence(format!("I/O error while reading JSON: {self}")),
            // Data errors carry the domain's own decode failures (bad dates,
            // probability out of range) as their message.
            Category::Syntax | Category::Data | Category::Eof => {
                ResplanError::InvalidInput(format!("invalid JSON: {self}"))
            }
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        Self(value.into_resplan())
    }
}

/* -------------------------------------------------------------------------- */
/* toml errors → ResplanError */
/* -------------------------------------------------------------------------- */

impl IntoResplanError for toml::de::Error {
    fn into_resplan(self) -> ResplanError {
        ResplanError::Config(format!("invalid TOML: {}", self.message()))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        Self(value.into_resplan())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ResplanError */
/* -------------------------------------------------------------------------- */

impl IntoResplanError for HttpError {
    fn into_resplan(self) -> ResplanError {
        if self.is_timeout() {
            return ResplanError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return ResplanError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => ResplanError::Auth(message),
                404 => ResplanError::NotFound(message),
                400..=499 if code != 429 => ResplanError::InvalidInput(message),
                _ => ResplanError::Network(message),
            };
        }

        if self.is_decode() {
            return ResplanError::Internal(format!("unexpected response body: {self}"));
        }

        ResplanError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_resplan())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
