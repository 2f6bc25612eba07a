use serde::{Deserialize, Serialize};

/// 报告中的一条相似提交
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlagiarismMatch {
    pub submission_id: i64,
    pub student_id: i64,
    // 相似度百分比（0..100）
    pub similarity: i32,
    // 截断后的匹配内容，仅用于审阅
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlagiarismReport {
    pub id: i64,
    pub submission_id: i64,
    // 按相似度降序
    pub matches: Vec<PlagiarismMatch>,
    pub highest_similarity: i32,
    pub is_flagged: bool,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}
