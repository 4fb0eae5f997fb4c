use std::fmt;
use std::str::FromStr;

/// 路由模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 全局代理
    Global,
    /// 规则分流
    Rule,
    /// 直连
    Direct,
}

impl Mode {
    /// 所有可用模式
    pub const ALL: [Mode; 3] = [Mode::Global, Mode::Rule, Mode::Direct];

    /// 发送给控制接口的小写名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Global => "global",
            Mode::Rule => "rule",
            Mode::Direct => "direct",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 无法识别的模式名称
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid mode. Use one of: Global, Rule, Direct")]
pub struct ParseModeError {
    pub input: String,
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == lowered)
            .ok_or(ParseModeError { input: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_ignores_case() {
        for input in ["GLOBAL", "Global", "global"] {
            assert_eq!(input.parse::<Mode>(), Ok(Mode::Global));
        }
        assert_eq!("Direct".parse::<Mode>(), Ok(Mode::Direct));
        assert_eq!("rULE".parse::<Mode>().map(|m| m.to_string()), Ok("rule".to_string()));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = "turbo".parse::<Mode>().unwrap_err();
        assert_eq!(err.input, "turbo");
        assert_eq!(err.to_string(), "Invalid mode. Use one of: Global, Rule, Direct");
    }

    #[test]
    fn surrounding_whitespace_is_not_trimmed() {
        assert!(" rule".parse::<Mode>().is_err());
    }
}
