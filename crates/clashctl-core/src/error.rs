use std::io;

/// Error type for clashctl operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO操作错误
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// 无法连接到控制接口
    #[error("Connection error: {0}")]
    Connection(String),
    /// 超时错误
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// 请求错误
    #[error("Request failed: {0}")]
    Request(String),
    /// 配置错误
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for clashctl operations
pub type Result<T> = std::result::Result<T, Error>;

/// 从reqwest错误转换
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let message = with_causes(&err);
        if err.is_timeout() {
            Error::Timeout(message)
        } else if err.is_connect() {
            Error::Connection(message)
        } else if err.is_builder() {
            Error::Configuration(message)
        } else {
            Error::Request(message)
        }
    }
}

// reqwest 的 Display 不含底层原因（如 connection refused），逐级拼接
fn with_causes(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// 从toml错误转换
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_inner_message() {
        let err = Error::Configuration("api_url is empty".into());
        assert_eq!(err.to_string(), "Configuration error: api_url is empty");
    }

    #[test]
    fn reqwest_errors_carry_their_cause() {
        let err: Error = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Configuration(_)), "unexpected error: {err}");
        assert!(err.to_string().contains("relative URL without a base"), "{err}");
    }
}
