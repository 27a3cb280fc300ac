// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Formatter;

use code::ErrorCode;
use http::StatusCode;
use serde::Serialize;
use snafu::{Location, Snafu};

pub mod code;


#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PimError {
    #[snafu(display("{message}"))]
    Generic {
        message: String,
        #[snafu(implicit)]
        location: Location,
        code: ErrorCode,
    },
    /// A non-success result envelope returned by the upstream service.
    #[snafu(display("upstream returned {status}: {message}"))]
    Upstream {
        message: String,
        status: u16,
        #[snafu(implicit)]
        location: Location,
    },
}

pub type PimResult<T, E = PimError> = std::result::Result<T, E>;

impl PimError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PimError::Generic { code, .. } => *code,
            PimError::Upstream { .. } => ErrorCode::UpstreamRequestFailed,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            PimError::Generic { code, .. } => code.status(),
            PimError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PimError::Generic { message, .. } | PimError::Upstream { message, .. } => message,
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.status() == StatusCode::UNAUTHORIZED
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub message: String,
    pub code: u32,
    pub status: u16,
}

impl From<&PimError> for ApiError {
    fn from(error: &PimError) -> Self {
        ApiError {
            message: error.message().to_string(),
            code: error.code() as u32,
            status: error.status().as_u16(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error({}/{}): {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
