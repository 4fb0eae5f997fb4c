//! Command dispatcher
//!
//! Every command is one linear exchange with the controller. Failures are
//! reported on the output and the command returns normally; only errors
//! writing the output itself are propagated.

use std::io::{self, Write};
use clashctl_core::runtime::delay_ms;
use clashctl_core::{
    ConnectionsInfo, ControllerClient, Mode, ProfileDir, ProxyTable, RuntimeConfig, Settings,
    Traffic, VersionInfo,
};
use tracing::{debug, info};
use crate::ui::{self, DAEMON_HINT, RULE};
use crate::Command;

/// `status` 中展示选中节点的代理组
const STATUS_GROUPS: [&str; 2] = ["GLOBAL", "Proxy"];

/// 命令分发器
pub struct Dispatcher<W> {
    client: ControllerClient,
    profiles: ProfileDir,
    out: W,
}

impl<W: Write> Dispatcher<W> {
    /// 根据设置创建分发器，输出写入 `out`
    pub fn new(settings: &Settings, out: W) -> clashctl_core::Result<Self> {
        Ok(Self {
            client: ControllerClient::new(settings)?,
            profiles: ProfileDir::new(settings.config_dir.clone()),
            out,
        })
    }

    /// 取回输出
    pub fn into_inner(self) -> W {
        self.out
    }

    /// 执行一条命令
    pub async fn run(&mut self, command: Command) -> io::Result<()> {
        debug!("dispatching {:?} against {}", command, self.client.base_url());
        match command {
            Command::List => self.list(),
            Command::Switch { config_file } => self.switch(&config_file).await,
            Command::Status => self.status().await,
            Command::Mode { mode } => self.set_mode(&mode).await,
            Command::Select { group, proxy } => self.select(&group, &proxy).await,
            Command::Proxies => self.proxies().await,
            Command::Test { proxy } => self.test(&proxy).await,
            Command::Check => self.check().await,
            Command::Version => self.version().await,
            Command::Connections => self.connections().await,
            Command::Traffic => self.traffic().await,
        }
    }

    /// 列出所有配置文件
    pub fn list(&mut self) -> io::Result<()> {
        let names = match self.profiles.list() {
            Ok(names) => names,
            Err(e) => {
                writeln!(self.out, "Error reading config directory: {}", e)?;
                return Ok(());
            }
        };

        writeln!(self.out, "Available configurations:")?;
        for name in names {
            writeln!(self.out, "  - {}", name)?;
        }
        Ok(())
    }

    /// 切换配置文件
    pub async fn switch(&mut self, config_file: &str) -> io::Result<()> {
        let profile = match self.profiles.resolve(config_file) {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                let name = clashctl_core::profile::normalize_name(config_file);
                writeln!(self.out, "Config file {} does not exist", name)?;
                return Ok(());
            }
            Err(e) => {
                writeln!(self.out, "Error reading config directory: {}", e)?;
                return Ok(());
            }
        };

        info!("switching to {}", profile.path.display());
        match self.client.switch_config(&profile.path).await {
            Ok(resp) if resp.is_no_content() => {
                writeln!(self.out, "Successfully switched to {}", profile.name)
            }
            Ok(resp) => writeln!(self.out, "Failed to switch config: {}", resp.body),
            Err(e) => {
                writeln!(self.out, "Error switching config: {}", e)?;
                writeln!(self.out, "{}", DAEMON_HINT)
            }
        }
    }

    /// 显示当前状态
    pub async fn status(&mut self) -> io::Result<()> {
        let proxies = match self.client.get_proxies().await {
            Ok(resp) => resp.json(),
            Err(e) => {
                writeln!(self.out, "Error getting proxy status: {}", e)?;
                writeln!(self.out, "{}", DAEMON_HINT)?;
                return Ok(());
            }
        };

        writeln!(self.out, "Clash Status:")?;
        writeln!(self.out, "{}", RULE)?;

        match self.client.get_configs().await {
            Ok(resp) => {
                let body = resp.json();
                let config = RuntimeConfig::new(&body);
                if let Some(mode) = config.mode() {
                    writeln!(self.out, "Mode: {}", mode)?;
                }
                if let Some(port) = config.port() {
                    writeln!(self.out, "HTTP Port: {}", port)?;
                }
                if let Some(port) = config.socks_port() {
                    writeln!(self.out, "SOCKS Port: {}", port)?;
                }
            }
            Err(e) => debug!("skipping runtime config: {}", e),
        }

        let table = ProxyTable::new(&proxies);
        if table.is_present() {
            writeln!(self.out, "\nSelected Proxies:")?;
            for group in STATUS_GROUPS {
                if let Some(now) = table.get(group).and_then(|entry| entry.now()) {
                    writeln!(self.out, "  {}: {}", group, now)?;
                }
            }
        }
        Ok(())
    }

    /// 修改路由模式
    pub async fn set_mode(&mut self, input: &str) -> io::Result<()> {
        let mode: Mode = match input.parse() {
            Ok(mode) => mode,
            Err(e) => return writeln!(self.out, "{}", e),
        };

        match self.client.set_mode(mode).await {
            Ok(resp) if resp.is_no_content() => {
                writeln!(self.out, "Successfully set mode to {}", mode)
            }
            Ok(resp) => writeln!(self.out, "Failed to set mode: {}", resp.body),
            Err(e) => writeln!(self.out, "Error setting mode: {}", e),
        }
    }

    /// 在代理组中选择节点
    pub async fn select(&mut self, group: &str, proxy: &str) -> io::Result<()> {
        match self.client.select_proxy(group, proxy).await {
            Ok(resp) if resp.is_no_content() => {
                writeln!(self.out, "Successfully selected {} in group {}", proxy, group)
            }
            Ok(resp) => writeln!(self.out, "Failed to select proxy: {}", resp.body),
            Err(e) => writeln!(self.out, "Error selecting proxy: {}", e),
        }
    }

    /// 列出代理组和节点
    pub async fn proxies(&mut self) -> io::Result<()> {
        let body = match self.client.get_proxies().await {
            Ok(resp) => resp.json(),
            Err(e) => return writeln!(self.out, "Error getting proxies: {}", e),
        };

        let table = ProxyTable::new(&body);
        if !table.is_present() {
            return Ok(());
        }

        writeln!(self.out, "Proxy Groups:")?;
        writeln!(self.out, "{}", RULE)?;
        for group in table.selectors() {
            writeln!(self.out, "\n[{}]", group.name())?;
            for (index, member) in group.members() {
                let marker = ui::selection_marker(member, group.now());
                writeln!(self.out, "  {} {}. {}", marker, index, member)?;
            }
        }
        Ok(())
    }

    /// 测试节点延迟
    pub async fn test(&mut self, proxy: &str) -> io::Result<()> {
        let resp = match self.client.delay_test(proxy).await {
            Ok(resp) => resp,
            Err(e) => return writeln!(self.out, "Error testing latency: {}", e),
        };

        match delay_ms(&resp.json()) {
            Some(delay) => writeln!(self.out, "Proxy: {}, Latency: {:.0} ms", proxy, delay),
            None => writeln!(self.out, "Failed to test latency: {}", resp.body),
        }
    }

    /// 检测每个 Selector 组当前选中节点的延迟
    pub async fn check(&mut self) -> io::Result<()> {
        let body = match self.client.get_proxies().await {
            Ok(resp) => resp.json(),
            Err(e) => {
                writeln!(self.out, "Error getting proxies: {}", e)?;
                return writeln!(self.out, "{}", DAEMON_HINT);
            }
        };

        let table = ProxyTable::new(&body);
        let selectors: Vec<_> = table.selectors().collect();
        if selectors.is_empty() {
            return writeln!(self.out, "No proxy groups found.");
        }

        // 没有选中节点的组不参与检测
        let mut groups: Vec<(&str, &str)> = selectors
            .iter()
            .filter_map(|group| group.now().map(|now| (group.name(), now)))
            .collect();
        groups.sort();

        writeln!(self.out, "Checking selected nodes...")?;
        let pb = ui::create_progress_bar(groups.len() as u64);
        for (group, now) in groups {
            pb.set_message(now.to_string());
            let delay = match self.client.delay_test(now).await {
                Ok(resp) => delay_ms(&resp.json()),
                Err(e) => {
                    debug!("delay test for {} failed: {}", now, e);
                    None
                }
            };
            let result = match delay {
                Some(delay) => ui::colored_latency(delay).to_string(),
                None => "timeout/error".to_string(),
            };
            let out = &mut self.out;
            pb.suspend(|| writeln!(out, "{}: [{}] ... {}", group, now, result))?;
            pb.inc(1);
        }
        pb.finish_and_clear();
        Ok(())
    }

    /// 显示内核版本
    pub async fn version(&mut self) -> io::Result<()> {
        let resp = match self.client.get_version().await {
            Ok(resp) => resp,
            Err(e) => {
                writeln!(self.out, "Error getting version: {}", e)?;
                return writeln!(self.out, "{}", DAEMON_HINT);
            }
        };

        let body = resp.json();
        let info = VersionInfo::new(&body);
        match info.version() {
            Some(version) => {
                let mut line = format!("Clash version: {}", version);
                if info.premium() {
                    line.push_str(" (premium)");
                }
                if info.meta() {
                    line.push_str(" (meta)");
                }
                writeln!(self.out, "{}", line)
            }
            None => writeln!(self.out, "Failed to get version: {}", resp.body),
        }
    }

    /// 显示活跃连接数
    pub async fn connections(&mut self) -> io::Result<()> {
        let resp = match self.client.get_connections().await {
            Ok(resp) => resp,
            Err(e) => {
                writeln!(self.out, "Error getting connections: {}", e)?;
                return writeln!(self.out, "{}", DAEMON_HINT);
            }
        };

        match ConnectionsInfo::new(&resp.json()).count() {
            Some(count) => writeln!(self.out, "Active connections: {}", count),
            None => writeln!(self.out, "Failed to get connections: {}", resp.body),
        }
    }

    /// 显示当前上传和下载速度
    pub async fn traffic(&mut self) -> io::Result<()> {
        let resp = match self.client.get_traffic().await {
            Ok(resp) => resp,
            Err(e) => {
                writeln!(self.out, "Error getting traffic: {}", e)?;
                return writeln!(self.out, "{}", DAEMON_HINT);
            }
        };

        let body = resp.json();
        let traffic = Traffic::new(&body);
        match (traffic.up(), traffic.down()) {
            (Some(up), Some(down)) => {
                writeln!(self.out, "Upload: {}", ui::format_speed(up))?;
                writeln!(self.out, "Download: {}", ui::format_speed(down))
            }
            _ => writeln!(self.out, "Failed to get traffic: {}", resp.body),
        }
    }
}
