// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

#[macro_export]
macro_rules! keeppim_version {
    () => {
        env!("CARGO_PKG_VERSION")
    };
}

#[macro_export]
macro_rules! raise_error {
    ($msg:expr, $code:expr) => {
        $crate::modules::error::PimError::Generic {
            message: $msg,
            location: snafu::Location::default(),
            code: $code,
        }
    };
}

#[macro_export]
macro_rules! raise_upstream_error {
    ($msg:expr, $status:expr) => {
        $crate::modules::error::PimError::Upstream {
            message: $msg,
            status: $status,
            location: snafu::Location::default(),
        }
    };
}
