//! clashctl CLI - command line interface for the Clash external controller
//!
//! This library provides the command surface and the dispatcher that turns
//! each sub-command into controller requests and formatted output.

use std::path::PathBuf;
use clap::{ArgAction, Parser, Subcommand};

pub mod dispatch;
pub mod ui;

pub use dispatch::Dispatcher;

/// A CLI tool to manage Clash proxy
#[derive(Debug, Parser)]
#[command(name = "clashctl")]
#[command(version, about = "A CLI tool to manage Clash proxy")]
#[command(long_about = "clashctl manages Clash proxy configurations, switches profiles and \
modifies runtime settings through the external controller API.")]
pub struct Cli {
    /// 日志详细程度 (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// 控制接口地址
    #[arg(long, env = "CLASH_API_URL", global = true)]
    pub api_url: Option<String>,

    /// 控制接口密钥
    #[arg(long, env = "CLASH_SECRET", hide_env_values = true, global = true)]
    pub secret: Option<String>,

    /// 配置文件目录
    #[arg(long, env = "CLASH_CONFIG_DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// clashctl 设置文件 (默认 ~/.config/clashctl/clashctl.toml)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI命令枚举
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List all available configurations
    List,
    /// Switch to a different configuration
    Switch {
        /// 配置文件名，可省略 .yaml 后缀
        config_file: String,
    },
    /// Get current Clash status
    Status,
    /// Set Clash mode (Global, Rule, Direct)
    Mode {
        mode: String,
    },
    /// Select a proxy from a group
    Select {
        group: String,
        proxy: String,
    },
    /// List all proxy groups and proxies
    Proxies,
    /// Test proxy latency
    Test {
        proxy: String,
    },
    /// Test the selected node of every proxy group
    Check,
    /// Show the Clash core version
    Version,
    /// Show the number of active connections
    Connections,
    /// Show the current upload and download speed
    Traffic,
}
