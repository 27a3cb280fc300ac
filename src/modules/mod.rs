// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

pub mod cache;
pub mod common;
pub mod decode;
pub mod error;
pub mod item;
pub mod logger;
pub mod manager;
pub mod property;
pub mod retrieval;
pub mod settings;
pub mod transport;
pub mod utils;
