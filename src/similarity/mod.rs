//! 余弦相似度与相似提交匹配
//!
//! 纯函数，不做任何 I/O。

use tracing::error;

use crate::embedding::EmbeddingVector;
use crate::errors::{PipelineError, Result};

/// 参与比较的候选提交
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    pub id: i64,
    pub vector: EmbeddingVector,
    pub student_id: i64,
    pub content: String,
}

/// 相似度达到阈值的候选提交，similarity 取值 0..1
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatch {
    pub id: i64,
    pub similarity: f64,
    pub student_id: i64,
    pub content: String,
}

/// 余弦相似度，结果在 [-1, 1]
///
/// 长度不同返回 `DimensionMismatch`；任一向量范数为 0 时相似度为 0。
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(PipelineError::dimension_mismatch(format!(
            "cannot compare vectors of length {} and {}",
            a.len(),
            b.len()
        )));
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    if similarity.is_nan() {
        return Ok(0.0);
    }
    Ok(similarity.clamp(-1.0, 1.0))
}

/// 找出与目标向量相似度不低于阈值的候选提交，按相似度降序
///
/// 相似度相同时保持候选的输入顺序。维度不一致的候选视为数据损坏，
/// 记录错误日志后跳过，不影响其他候选。
pub fn find_matches(
    target: &EmbeddingVector,
    candidates: &[MatchCandidate],
    threshold: f64,
) -> Vec<SimilarityMatch> {
    let mut matches: Vec<SimilarityMatch> = candidates
        .iter()
        .filter_map(|candidate| {
            match cosine_similarity(target.as_slice(), candidate.vector.as_slice()) {
                Ok(similarity) => Some((candidate, similarity)),
                Err(e) => {
                    error!(
                        "Skipping submission {} in similarity check: {}",
                        candidate.id, e
                    );
                    None
                }
            }
        })
        .filter(|(_, similarity)| *similarity >= threshold)
        .map(|(candidate, similarity)| SimilarityMatch {
            id: candidate.id,
            similarity,
            student_id: candidate.student_id,
            content: candidate.content.clone(),
        })
        .collect();

    // sort_by 是稳定排序
    matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    matches
}
