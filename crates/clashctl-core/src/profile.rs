//! Configuration files ("profiles") in the flat configuration directory.

use std::fs;
use std::path::PathBuf;
use crate::error::Result;
use tracing::debug;

/// 默认补全的扩展名
pub const DEFAULT_EXTENSION: &str = ".yaml";

/// 文件名是否以 `.yaml` 或 `.yml` 结尾
pub fn is_profile_name(name: &str) -> bool {
    name.ends_with(".yaml") || name.ends_with(".yml")
}

/// 没有扩展名时补上 `.yaml`
pub fn normalize_name(name: &str) -> String {
    if is_profile_name(name) {
        name.to_string()
    } else {
        format!("{}{}", name, DEFAULT_EXTENSION)
    }
}

/// 解析后的配置文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// 文件名
    pub name: String,
    /// 绝对路径
    pub path: PathBuf,
}

/// 配置文件目录
#[derive(Debug, Clone)]
pub struct ProfileDir {
    dir: PathBuf,
}

impl ProfileDir {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// 列出目录中的配置文件名（按名称排序）
    ///
    /// 目录本身（即使名称以 `.yaml` 结尾）不会列出；符号链接不跟随。
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if is_profile_name(&name) => names.push(name),
                Ok(_) => {}
                Err(raw) => debug!("skipping non UTF-8 file name {:?}", raw),
            }
        }
        names.sort();
        Ok(names)
    }

    /// 把用户输入解析为目录中的配置文件
    ///
    /// 文件不存在时返回 `Ok(None)`。无法确定是否存在（例如权限问题）时视为存在，
    /// 交给控制器去报告错误。
    pub fn resolve(&self, input: &str) -> Result<Option<Profile>> {
        let name = normalize_name(input);
        let dir = if self.dir.is_absolute() {
            self.dir.clone()
        } else {
            std::env::current_dir()?.join(&self.dir)
        };
        let path = dir.join(&name);

        match path.try_exists() {
            Ok(false) => Ok(None),
            Ok(true) => Ok(Some(Profile { name, path })),
            Err(e) => {
                debug!("cannot stat {}: {}", path.display(), e);
                Ok(Some(Profile { name, path }))
            }
        }
    }
}
