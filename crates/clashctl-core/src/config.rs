use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use crate::error::{Error, Result};
use tracing::{debug, info, warn};

/// 设置文件名
pub const SETTINGS_FILE: &str = "clashctl.toml";

/// 运行时设置，启动时构造一次并传给命令分发器
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// 控制接口地址
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// 控制接口密钥（external-controller secret）
    #[serde(default)]
    pub secret: Option<String>,
    /// 配置文件目录
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,
    /// 延迟测试超时（毫秒），由守护进程执行
    #[serde(default = "default_delay_timeout_ms")]
    pub delay_timeout_ms: u64,
    /// 延迟测试URL
    #[serde(default = "default_delay_test_url")]
    pub delay_test_url: String,
}

fn default_api_url() -> String { "http://127.0.0.1:9090".to_string() }
fn default_delay_timeout_ms() -> u64 { 5000 }
fn default_delay_test_url() -> String { "http://www.gstatic.com/generate_204".to_string() }

fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("clash")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            secret: None,
            config_dir: default_config_dir(),
            delay_timeout_ms: default_delay_timeout_ms(),
            delay_test_url: default_delay_test_url(),
        }
    }
}

impl Settings {
    /// 默认设置文件位置: ~/.config/clashctl/clashctl.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("clashctl").join(SETTINGS_FILE))
    }

    /// 从文件加载设置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            Error::Configuration(format!("cannot read {}: {}", path.as_ref().display(), e))
        })?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// 加载设置文件，失败时回退到默认值
    ///
    /// 显式指定的文件必须存在；默认位置的文件不存在时直接使用默认设置。
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("no settings file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if explicit.is_some() && !path.exists() {
            return Err(Error::Configuration(format!(
                "settings file {} does not exist",
                path.display()
            )));
        }

        match Self::from_file(&path) {
            Ok(settings) => {
                info!("settings loaded from {}", path.display());
                Ok(settings)
            }
            Err(e) => {
                warn!("ignoring settings file {}: {}", path.display(), e);
                Ok(Self::default())
            }
        }
    }

    /// 用命令行/环境变量覆盖设置项
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        secret: Option<String>,
        config_dir: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(secret) = secret {
            self.secret = Some(secret);
        }
        if let Some(dir) = config_dir {
            self.config_dir = dir;
        }
        self.validate()?;
        Ok(self)
    }

    /// 去掉末尾斜杠的接口地址
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err(Error::Configuration("api_url is empty".to_string()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Configuration(format!(
                "api_url must start with http:// or https://, got {}",
                url
            )));
        }
        Ok(())
    }
}
