use std::path::Path;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, trace};
use crate::config::Settings;
use crate::error::Result;
use crate::mode::Mode;

/// 控制接口的原始响应
///
/// 状态码和响应体原样保留：调用方决定哪些状态算成功，失败时把响应体展示给用户。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// 写操作只有 204 才算成功
    pub fn is_no_content(&self) -> bool {
        self.status == StatusCode::NO_CONTENT
    }

    /// 宽松解析 JSON，无法解析时返回 `Value::Null`
    pub fn json(&self) -> Value {
        match serde_json::from_str(&self.body) {
            Ok(value) => value,
            Err(e) => {
                debug!("response body is not JSON ({}), treating as empty", e);
                Value::Null
            }
        }
    }
}

/// Clash 控制接口客户端
pub struct ControllerClient {
    client: Client,
    base_url: String,
    secret: Option<String>,
    delay_timeout_ms: u64,
    delay_test_url: String,
}

impl ControllerClient {
    /// 根据设置创建客户端
    pub fn new(settings: &Settings) -> Result<Self> {
        // 控制器在本机，不走环境变量里的代理
        let client = Client::builder().no_proxy().build()?;
        Ok(Self {
            client,
            base_url: settings.base_url().to_string(),
            secret: settings.secret.clone(),
            delay_timeout_ms: settings.delay_timeout_ms,
            delay_test_url: settings.delay_test_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 获取所有代理组和节点
    pub async fn get_proxies(&self) -> Result<ApiResponse> {
        self.send(Method::GET, "/proxies", None, &[]).await
    }

    /// 获取当前运行配置
    pub async fn get_configs(&self) -> Result<ApiResponse> {
        self.send(Method::GET, "/configs", None, &[]).await
    }

    /// 让守护进程加载另一个配置文件
    pub async fn switch_config(&self, path: &Path) -> Result<ApiResponse> {
        let body = json!({ "path": path.to_string_lossy() });
        self.send(Method::PUT, "/configs", Some(&body), &[]).await
    }

    /// 修改路由模式
    pub async fn set_mode(&self, mode: Mode) -> Result<ApiResponse> {
        let body = json!({ "mode": mode.as_str() });
        self.send(Method::PATCH, "/configs", Some(&body), &[]).await
    }

    /// 切换代理组的选中节点
    ///
    /// 组名直接拼进路径，不做转义。
    pub async fn select_proxy(&self, group: &str, proxy: &str) -> Result<ApiResponse> {
        let body = json!({ "name": proxy });
        let path = format!("/proxies/{}", group);
        self.send(Method::PUT, &path, Some(&body), &[]).await
    }

    /// 由守护进程测试指定节点的延迟
    pub async fn delay_test(&self, proxy: &str) -> Result<ApiResponse> {
        let path = format!("/proxies/{}/delay", proxy);
        let timeout = self.delay_timeout_ms.to_string();
        let query = [("timeout", timeout.as_str()), ("url", self.delay_test_url.as_str())];
        self.send(Method::GET, &path, None, &query).await
    }

    /// 获取内核版本
    pub async fn get_version(&self) -> Result<ApiResponse> {
        self.send(Method::GET, "/version", None, &[]).await
    }

    /// 获取当前活跃连接
    pub async fn get_connections(&self) -> Result<ApiResponse> {
        self.send(Method::GET, "/connections", None, &[]).await
    }

    /// 获取一次流量快照
    ///
    /// `/traffic` 是每秒推送一行 JSON 的流，只读取第一个数据块的第一行。
    pub async fn get_traffic(&self) -> Result<ApiResponse> {
        let mut response = self.request(Method::GET, "/traffic", None, &[]).send().await?;
        let status = response.status();
        let body = match response.chunk().await? {
            Some(chunk) => String::from_utf8_lossy(&chunk)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string(),
            None => String::new(),
        };
        debug!("/traffic -> {} ({})", status, body);

        Ok(ApiResponse { status, body })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse> {
        let response = self.request(method, path, body, query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("{} -> {} ({} bytes)", path, status, body.len());

        Ok(ApiResponse { status, body })
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, &str)],
    ) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            trace!("request body: {}", body);
            request = request.json(body);
        }
        if let Some(secret) = &self.secret {
            request = request.bearer_auth(secret);
        }
        request
    }
}
