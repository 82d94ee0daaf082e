//! 词典源获取
//!
//! `Transport` 是网络获取原语，`SourceFetcher` 在其外层加上每次尝试独立的超时，
//! 并把响应体解析为映射表。超时计时器归属于获取的 future，无论成功还是失败，
//! future 结束或被丢弃时计时器都会随之释放。

use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};

use super::mapping::Mapping;
use crate::translation::config::constants;
use crate::translation::error::{helpers, TranslationResult};

/// 网络获取原语
pub trait Transport: Send + Sync {
    /// 获取指定 URL 的响应体。不负责超时，由调用方限定。
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, TranslationResult<Vec<u8>>>;
}

/// 基于 reqwest 的 HTTP 传输
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> TranslationResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(constants::USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, TranslationResult<Vec<u8>>> {
        async move {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(helpers::network_error(format!(
                    "响应状态异常 {}: {}",
                    status, url
                )));
            }
            let body = response.bytes().await?;
            Ok(body.to_vec())
        }
        .boxed()
    }
}

/// 单个词典源的有界获取器
#[derive(Clone)]
pub struct SourceFetcher {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl SourceFetcher {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// 使用默认超时获取并解析词典
    pub async fn fetch(&self, url: &str) -> TranslationResult<Mapping> {
        self.fetch_with_timeout(url, self.timeout).await
    }

    /// 获取并解析词典
    ///
    /// # 错误
    /// - `NetworkError`: 传输失败或非成功状态码
    /// - `TimeoutError`: `timeout` 内没有响应
    /// - `ParseError`: 响应体不是字符串到字符串的映射
    pub async fn fetch_with_timeout(
        &self,
        url: &str,
        timeout: Duration,
    ) -> TranslationResult<Mapping> {
        tracing::debug!("获取词典源: {} (超时 {}ms)", url, timeout.as_millis());

        let body = match tokio::time::timeout(timeout, self.transport.fetch(url)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(helpers::timeout_error(format!(
                    "加载超时 ({}ms): {}",
                    timeout.as_millis(),
                    url
                )))
            }
        };

        let mapping = Mapping::from_json_slice(&body).map_err(|e| e.with_context(url))?;
        tracing::debug!("词典源 {} 返回 {} 个词条", url, mapping.len());
        Ok(mapping)
    }
}
