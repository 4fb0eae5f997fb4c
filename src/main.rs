use std::io;
use anyhow::{Context, Result};
use clap::Parser;
use clashctl_cli::{Cli, Dispatcher};
use clashctl_core::{init_logger, Settings};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    init_logger(cli.verbose);

    // 加载设置，命令行和环境变量优先
    let settings = Settings::load(cli.settings.as_deref())
        .context("failed to load settings")?
        .with_overrides(cli.api_url, cli.secret, cli.config_dir)
        .context("invalid settings")?;
    info!(
        "controller {}, config dir {}",
        settings.base_url(),
        settings.config_dir.display()
    );

    let mut dispatcher = Dispatcher::new(&settings, io::stdout())?;
    dispatcher.run(cli.command).await?;

    Ok(())
}
