use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::config::CacheConfig;
use crate::embedding::{EmbeddingVector, codec};
use crate::errors::Result;

/// 提交 ID → 解码后的向量
#[derive(Clone)]
pub struct VectorCache {
    inner: Cache<i64, Arc<EmbeddingVector>>,
}

impl VectorCache {
    pub fn new(config: &CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.memory.max_capacity)
            .time_to_live(Duration::from_secs(config.default_ttl))
            .build();

        debug!(
            "VectorCache initialized with max capacity: {}",
            config.memory.max_capacity
        );
        Self { inner }
    }

    pub async fn get(&self, submission_id: i64) -> Option<Arc<EmbeddingVector>> {
        self.inner.get(&submission_id).await
    }

    pub async fn insert(&self, submission_id: i64, vector: Arc<EmbeddingVector>) {
        self.inner.insert(submission_id, vector).await;
    }

    pub async fn invalidate(&self, submission_id: i64) {
        self.inner.invalidate(&submission_id).await;
    }

    /// 命中缓存直接返回，否则解码存储中的字节并写入缓存
    ///
    /// 解码失败不会写入缓存。
    pub async fn get_or_decode(
        &self,
        submission_id: i64,
        bytes: &[u8],
    ) -> Result<Arc<EmbeddingVector>> {
        if let Some(vector) = self.inner.get(&submission_id).await {
            debug!("Vector cache hit for submission {}", submission_id);
            return Ok(vector);
        }

        let vector = Arc::new(codec::decode(bytes)?);
        self.inner.insert(submission_id, vector.clone()).await;
        Ok(vector)
    }
}
