//! clashctl Core - settings, controller API client and payload views
//!
//! This library provides the pieces the CLI needs to talk to a running Clash
//! daemon through its external controller.

// 导出模块
pub mod api;
pub mod config;
pub mod error;
pub mod mode;
pub mod profile;
pub mod proxy;
pub mod runtime;

// 从模块导出核心类型
pub use api::{ApiResponse, ControllerClient};
pub use config::Settings;
pub use error::{Error, Result};
pub use mode::{Mode, ParseModeError};
pub use profile::{Profile, ProfileDir};
pub use proxy::{ProxyEntry, ProxyTable};
pub use runtime::{ConnectionsInfo, RuntimeConfig, Traffic, VersionInfo};

/// Initialize the logger; `verbosity` counts `-v` flags
///
/// Logs go to stderr so that command output stays on stdout. `RUST_LOG`
/// takes precedence over the verbosity level.
pub fn init_logger(verbosity: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
