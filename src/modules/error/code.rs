// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use http::StatusCode;
use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[repr(u32)]
pub enum ErrorCode {
    // Client-side errors (10000–10999)
    InvalidParameter = 10000,
    MissingConfiguration = 10020,
    ExceedsLimitation = 10040,

    // Authentication and authorization errors (20000–20999)
    Unauthenticated = 20000,
    PermissionDenied = 20010,

    // Resource errors (30000–30999)
    ResourceNotFound = 30000,
    AlreadyExists = 30010,

    // Item model errors (40000–40999)
    MalformedItem = 40000,
    MissingIdentifier = 40010,
    MissingCalendarId = 40020,
    UnsupportedItemKind = 40030,

    // Upstream service errors (50000–50999)
    UpstreamRequestFailed = 50000,
    UpstreamUnexpectedResult = 50010,

    // Internal system errors (70000–70999)
    InternalError = 70000,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidParameter
            | ErrorCode::MissingConfiguration
            | ErrorCode::ExceedsLimitation => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorCode::PermissionDenied => StatusCode::FORBIDDEN,
            ErrorCode::ResourceNotFound => StatusCode::NOT_FOUND,
            ErrorCode::AlreadyExists => StatusCode::CONFLICT,
            ErrorCode::MalformedItem
            | ErrorCode::MissingIdentifier
            | ErrorCode::MissingCalendarId
            | ErrorCode::UnsupportedItemKind => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::UpstreamRequestFailed | ErrorCode::UpstreamUnexpectedResult => {
                StatusCode::BAD_GATEWAY
            }
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
