//! Views over `/configs`, `/version`, `/connections`, `/traffic` and
//! delay-test payloads.

use serde_json::Value;

/// `GET /configs` 的响应
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig<'a>(&'a Value);

impl<'a> RuntimeConfig<'a> {
    pub fn new(body: &'a Value) -> Self {
        Self(body)
    }

    /// 当前路由模式
    pub fn mode(&self) -> Option<&'a str> {
        self.0.get("mode").and_then(Value::as_str)
    }

    /// HTTP 代理端口
    pub fn port(&self) -> Option<i64> {
        self.number("port")
    }

    /// SOCKS 代理端口
    pub fn socks_port(&self) -> Option<i64> {
        self.number("socks-port")
    }

    // 整数和浮点数都接受，小数部分截断
    fn number(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_f64).map(|n| n as i64)
    }
}

/// 延迟测试结果中的 `delay` 字段（毫秒）
pub fn delay_ms(body: &Value) -> Option<f64> {
    body.get("delay").and_then(Value::as_f64)
}

/// `GET /version` 的响应
#[derive(Debug, Clone, Copy)]
pub struct VersionInfo<'a>(&'a Value);

impl<'a> VersionInfo<'a> {
    pub fn new(body: &'a Value) -> Self {
        Self(body)
    }

    pub fn version(&self) -> Option<&'a str> {
        self.0.get("version").and_then(Value::as_str)
    }

    pub fn premium(&self) -> bool {
        self.flag("premium")
    }

    /// Clash.Meta / mihomo 内核
    pub fn meta(&self) -> bool {
        self.flag("meta")
    }

    fn flag(&self, key: &str) -> bool {
        self.0.get(key).and_then(Value::as_bool).unwrap_or(false)
    }
}

/// `GET /connections` 的响应
#[derive(Debug, Clone, Copy)]
pub struct ConnectionsInfo<'a>(&'a Value);

impl<'a> ConnectionsInfo<'a> {
    pub fn new(body: &'a Value) -> Self {
        Self(body)
    }

    /// 活跃连接数；`connections` 为 `null` 时（无连接）记为 0
    pub fn count(&self) -> Option<usize> {
        match self.0.get("connections")? {
            Value::Array(items) => Some(items.len()),
            Value::Null => Some(0),
            _ => None,
        }
    }
}

/// `/traffic` 流的一行，单位 字节/秒
#[derive(Debug, Clone, Copy)]
pub struct Traffic<'a>(&'a Value);

impl<'a> Traffic<'a> {
    pub fn new(body: &'a Value) -> Self {
        Self(body)
    }

    pub fn up(&self) -> Option<u64> {
        self.0.get("up").and_then(Value::as_u64)
    }

    pub fn down(&self) -> Option<u64> {
        self.0.get("down").and_then(Value::as_u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ports_are_coerced_to_integers() {
        let body = json!({"mode": "rule", "port": 7890.0, "socks-port": 7891});
        let config = RuntimeConfig::new(&body);
        assert_eq!(config.mode(), Some("rule"));
        assert_eq!(config.port(), Some(7890));
        assert_eq!(config.socks_port(), Some(7891));
    }

    #[test]
    fn mistyped_fields_are_skipped() {
        let body = json!({"mode": 3, "port": "7890"});
        let config = RuntimeConfig::new(&body);
        assert_eq!(config.mode(), None);
        assert_eq!(config.port(), None);
        assert_eq!(config.socks_port(), None);
    }

    #[test]
    fn delay_reads_numbers_only() {
        assert_eq!(delay_ms(&json!({"delay": 123.0})), Some(123.0));
        assert_eq!(delay_ms(&json!({"delay": 88})), Some(88.0));
        assert_eq!(delay_ms(&json!({"message": "Timeout"})), None);
        assert_eq!(delay_ms(&json!({"delay": "fast"})), None);
    }

    #[test]
    fn version_flags_default_to_false() {
        let body = json!({"version": "v1.18.1", "meta": true});
        let info = VersionInfo::new(&body);
        assert_eq!(info.version(), Some("v1.18.1"));
        assert!(info.meta());
        assert!(!info.premium());
    }

    #[test]
    fn connection_count_tolerates_null_list() {
        assert_eq!(ConnectionsInfo::new(&json!({"connections": [{}, {}]})).count(), Some(2));
        assert_eq!(ConnectionsInfo::new(&json!({"connections": null})).count(), Some(0));
        assert_eq!(ConnectionsInfo::new(&json!({"message": "x"})).count(), None);
    }

    #[test]
    fn traffic_reads_unsigned_rates() {
        let body = json!({"up": 1024, "down": -1});
        let traffic = Traffic::new(&body);
        assert_eq!(traffic.up(), Some(1024));
        assert_eq!(traffic.down(), None);
    }
}
