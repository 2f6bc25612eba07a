//! 向量持久化格式
//!
//! `[版本 u8][维度 u32 LE][维度 × f32 LE]`，当前版本为 1。
//! 解析失败统一报告为 `VectorDecode`，与其他存储错误区分。

use super::EmbeddingVector;
use crate::errors::{PipelineError, Result};

pub const CODEC_VERSION: u8 = 1;
const HEADER_LEN: usize = 5;

pub fn encode(vector: &EmbeddingVector) -> Vec<u8> {
    let values = vector.as_slice();
    let mut bytes = Vec::with_capacity(HEADER_LEN + values.len() * 4);
    bytes.push(CODEC_VERSION);
    bytes.extend_from_slice(&(values.len() as u32).to_le_bytes());
    for value in values {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

pub fn decode(bytes: &[u8]) -> Result<EmbeddingVector> {
    let (&version, rest) = bytes
        .split_first()
        .ok_or_else(|| PipelineError::vector_decode("empty payload"))?;
    if version != CODEC_VERSION {
        return Err(PipelineError::vector_decode(format!(
            "unsupported vector format version {version}"
        )));
    }

    let (dim_bytes, payload) = rest
        .split_first_chunk::<4>()
        .ok_or_else(|| PipelineError::vector_decode("truncated header"))?;
    let dimension = u32::from_le_bytes(*dim_bytes) as usize;

    if payload.len() != dimension * 4 {
        return Err(PipelineError::vector_decode(format!(
            "expected {} bytes for {dimension} values, found {}",
            dimension * 4,
            payload.len()
        )));
    }

    let values = payload
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    Ok(EmbeddingVector::new(values))
}
