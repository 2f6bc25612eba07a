//! 特征哈希向量后端
//!
//! 不依赖模型文件：每个词哈希到固定维度的一个桶（带符号），
//! 对所有词取平均后单位化。相同文本得到相同向量，词汇重叠越多越相似。
//! 适合离线环境与测试，不具备真正的语义理解能力。

use tracing::debug;

use crate::config::EmbeddingConfig;
use crate::embedding::EmbeddingBackend;
use crate::embedding::EmbeddingVector;
use crate::errors::{PipelineError, Result};

pub const BACKEND_NAME: &str = "hashing";

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

pub struct HashingBackend {
    dimension: usize,
}

impl HashingBackend {
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(PipelineError::validation(
                "hashing backend dimension must be positive",
            ));
        }
        Ok(Self { dimension })
    }

    pub fn load(config: &EmbeddingConfig) -> Result<Self> {
        debug!(
            "HashingBackend initialized with dimension: {}",
            config.dimension
        );
        Self::new(config.dimension)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

/// FNV-1a，跨进程、跨版本稳定（存储的向量需要可比）
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// 小写并去掉首尾标点；纯标点的词保留原样
fn normalize_token(token: &str) -> String {
    let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric());
    if trimmed.is_empty() {
        token.to_lowercase()
    } else {
        trimmed.to_lowercase()
    }
}

impl EmbeddingBackend for HashingBackend {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut sums = vec![0f64; self.dimension];
        let mut count = 0usize;

        for token in text.split_whitespace().map(normalize_token) {
            let hash = fnv1a(token.as_bytes());
            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            sums[bucket] += sign;
            count += 1;
        }

        if count == 0 {
            return Err(PipelineError::embedding_generation(
                "no tokens to encode",
            ));
        }

        // mean pooling
        let pooled: Vec<f32> = sums.iter().map(|&s| (s / count as f64) as f32).collect();
        Ok(EmbeddingVector::new(pooled).normalized().into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_and_unit_length() {
        let backend = HashingBackend::new(64).unwrap();
        let a = backend.encode("The quick brown fox").unwrap();
        let b = backend.encode("The quick brown fox").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let backend = HashingBackend::new(128).unwrap();
        assert_eq!(
            backend.encode("Hello, World!").unwrap(),
            backend.encode("hello world").unwrap()
        );
    }

    #[test]
    fn test_empty_text_fails() {
        let backend = HashingBackend::new(16).unwrap();
        assert!(backend.encode("   ").is_err());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(HashingBackend::new(0).is_err());
    }

    #[test]
    fn test_fnv1a_known_value() {
        // FNV-1a("a")
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }
}
