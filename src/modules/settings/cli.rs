// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use clap::Parser;
use std::{path::PathBuf, sync::LazyLock, time::Duration};

#[cfg(not(test))]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::parse);

#[cfg(test)]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::new_for_test);

#[derive(Debug, Parser)]
#[clap(
    name = "keeppim",
    about = "Decodes Domino Keep PIM records (mail, calendar, contacts, tasks, notes, labels)
    into a single normalized item model.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Settings {
    /// keeppim log level (default: "info")
    #[clap(
        long,
        default_value = "info",
        env,
        help = "Set the log level for keeppim"
    )]
    pub keeppim_log_level: String,

    /// Enable ANSI logs (default: false)
    #[clap(long, default_value = "false", env, help = "Enable ANSI formatted logs")]
    pub keeppim_ansi_logs: bool,

    /// Enable log file output (default: false)
    /// If false, logs will be printed to stdout
    #[clap(
        long,
        default_value = "false",
        env,
        help = "Enable log file output (otherwise logs go to stdout)"
    )]
    pub keeppim_log_to_file: bool,

    #[clap(
        long,
        default_value = "./logs",
        env,
        help = "Directory that receives rolling log files"
    )]
    pub keeppim_log_dir: PathBuf,

    #[clap(
        long,
        default_value = "5",
        env,
        help = "Set the maximum number of log files to keep"
    )]
    pub keeppim_max_log_files: usize,

    /// Calendar id assigned to calendar entries that arrive without one.
    #[clap(
        long,
        default_value = "default",
        env,
        help = "Calendar id used when an upstream calendar entry carries none"
    )]
    pub keeppim_default_calendar: String,

    #[clap(
        long,
        default_value = "3",
        env,
        help = "Seconds a cached label list stays valid",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub keeppim_label_cache_ttl_secs: u64,

    #[clap(
        long,
        default_value = "1024",
        env,
        help = "Maximum number of (user, unread flag) label lists kept in memory",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub keeppim_label_cache_capacity: u64,

    #[clap(
        long,
        default_value = "20",
        env,
        help = "Smallest page requested from upstream when a bounded count is asked for",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub keeppim_min_page_size: u64,

    #[clap(
        long,
        env,
        help = "JSON file holding one raw upstream record or an array of them"
    )]
    pub keeppim_decode_input: Option<PathBuf>,

    #[clap(
        long,
        env,
        help = "View the decoded records were read from, e.g. ($Inbox)"
    )]
    pub keeppim_decode_view: Option<String>,
}

impl Settings {
    #[cfg(test)]
    fn new_for_test() -> Self {
        Self {
            keeppim_log_level: "info".to_string(),
            keeppim_ansi_logs: false,
            keeppim_log_to_file: false,
            keeppim_log_dir: PathBuf::from("./logs"),
            keeppim_max_log_files: 5,
            keeppim_default_calendar: "default".into(),
            keeppim_label_cache_ttl_secs: 3,
            keeppim_label_cache_capacity: 1024,
            keeppim_min_page_size: 20,
            keeppim_decode_input: None,
            keeppim_decode_view: None,
        }
    }
}

/// Runtime knobs handed to the factory, cache and managers.
#[derive(Debug, Clone)]
pub struct PimConfig {
    pub default_calendar_id: String,
    pub label_cache_ttl: Duration,
    pub label_cache_capacity: usize,
    pub min_page_size: usize,
}

impl Default for PimConfig {
    fn default() -> Self {
        Self {
            default_calendar_id: "default".into(),
            label_cache_ttl: Duration::from_secs(3),
            label_cache_capacity: 1024,
            min_page_size: 20,
        }
    }
}

impl From<&Settings> for PimConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            default_calendar_id: settings.keeppim_default_calendar.clone(),
            label_cache_ttl: Duration::from_secs(settings.keeppim_label_cache_ttl_secs),
            label_cache_capacity: settings.keeppim_label_cache_capacity as usize,
            min_page_size: settings.keeppim_min_page_size as usize,
        }
    }
}
