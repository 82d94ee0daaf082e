// 集成测试公共模块
//
// 提供可编排的假传输层和可观测的存储

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};

use dict_translator::translation::dictionary::{AcquirerConfig, Transport};
use dict_translator::translation::error::{TranslationError, TranslationResult};
use dict_translator::translation::storage::{MemoryStorage, Storage};

/// 单个 URL 的预设响应
#[derive(Clone)]
pub struct Scripted {
    pub delay: Duration,
    pub result: TranslationResult<Vec<u8>>,
}

impl Scripted {
    pub fn ok(delay_ms: u64, body: &str) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            result: Ok(body.as_bytes().to_vec()),
        }
    }

    pub fn network_error(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            result: Err(TranslationError::NetworkError("connection reset".to_string())),
        }
    }

    /// 永远不会在超时前返回
    pub fn hang() -> Self {
        Self {
            delay: Duration::from_secs(3600),
            result: Err(TranslationError::NetworkError("unreachable".to_string())),
        }
    }
}

/// 按 URL 返回预设响应的传输层，并记录调用次数
#[derive(Default)]
pub struct FakeTransport {
    responses: HashMap<String, Scripted>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, scripted: Scripted) -> Self {
        self.responses.insert(url.to_string(), scripted);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, TranslationResult<Vec<u8>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(url.to_string());

        async move {
            match self.responses.get(url) {
                Some(scripted) => {
                    if !scripted.delay.is_zero() {
                        tokio::time::sleep(scripted.delay).await;
                    }
                    scripted.result.clone()
                }
                None => Err(TranslationError::NetworkError(format!("404 Not Found: {}", url))),
            }
        }
        .boxed()
    }
}

/// 统计读写次数的内存存储
#[derive(Default)]
pub struct CountingStorage {
    inner: MemoryStorage,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl CountingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Storage for CountingStorage {
    fn get(&self, key: &str) -> TranslationResult<Option<Vec<u8>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> TranslationResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }
}

/// 读写都失败的存储
pub struct FailingStorage;

impl Storage for FailingStorage {
    fn get(&self, _key: &str) -> TranslationResult<Option<Vec<u8>>> {
        Err(TranslationError::CacheReadError("disk unavailable".to_string()))
    }

    fn set(&self, _key: &str, _value: &[u8]) -> TranslationResult<()> {
        Err(TranslationError::CacheError("disk unavailable".to_string()))
    }
}

/// 测试用获取配置
pub fn acquirer_config(sources: &[&str], timeout_ms: u64) -> AcquirerConfig {
    AcquirerConfig {
        sources: sources.iter().map(|s| s.to_string()).collect(),
        fetch_timeout: Duration::from_millis(timeout_ms),
        ..AcquirerConfig::default()
    }
}
