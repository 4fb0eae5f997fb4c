//! Read-only views over the controller's `/proxies` payload.
//!
//! The controller's schema drifts between daemon versions, so these views
//! never fail: a field that is missing or has an unexpected type reads as
//! `None` and the caller skips it.

use serde_json::{Map, Value};

/// 可切换节点的代理组类型
pub const SELECTOR: &str = "Selector";

/// `GET /proxies` 的响应
#[derive(Debug, Clone, Copy)]
pub struct ProxyTable<'a> {
    entries: Option<&'a Map<String, Value>>,
}

impl<'a> ProxyTable<'a> {
    pub fn new(body: &'a Value) -> Self {
        Self {
            entries: body.get("proxies").and_then(Value::as_object),
        }
    }

    /// `proxies` 字段是否为对象
    pub fn is_present(&self) -> bool {
        self.entries.is_some()
    }

    /// 按名称查找代理
    pub fn get(&self, name: &str) -> Option<ProxyEntry<'a>> {
        let (name, value) = self.entries?.get_key_value(name)?;
        value
            .as_object()
            .map(|fields| ProxyEntry { name: name.as_str(), fields })
    }

    /// 遍历所有代理，顺序与响应中的映射一致
    pub fn iter(&self) -> impl Iterator<Item = ProxyEntry<'a>> + 'a {
        self.entries
            .into_iter()
            .flat_map(|map| map.iter())
            .filter_map(|(name, value)| {
                value.as_object().map(|fields| ProxyEntry { name: name.as_str(), fields })
            })
    }

    /// 所有 Selector 类型的代理组
    pub fn selectors(&self) -> impl Iterator<Item = ProxyEntry<'a>> + 'a {
        self.iter().filter(|entry| entry.kind() == Some(SELECTOR))
    }
}

/// 单个代理或代理组
#[derive(Debug, Clone, Copy)]
pub struct ProxyEntry<'a> {
    name: &'a str,
    fields: &'a Map<String, Value>,
}

impl<'a> ProxyEntry<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// 代理类型 (Selector, URLTest, Direct, ...)
    pub fn kind(&self) -> Option<&'a str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    /// 当前选中的节点
    pub fn now(&self) -> Option<&'a str> {
        self.fields.get("now").and_then(Value::as_str)
    }

    /// 组成员及其从 1 开始的序号
    ///
    /// 非字符串成员被跳过，但序号仍按其在 `all` 中的位置计算。
    pub fn members(&self) -> impl Iterator<Item = (usize, &'a str)> + 'a {
        self.fields
            .get("all")
            .and_then(Value::as_array)
            .into_iter()
            .flat_map(|all| all.iter().enumerate())
            .filter_map(|(i, member)| member.as_str().map(|name| (i + 1, name)))
    }
}
