use serde::{Deserialize, Serialize};

use super::rubric::Rubric;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 关联的课程 ID
    pub course_id: i64,
    // 作业标题
    pub title: String,
    // 作业最高分数
    pub max_score: i64,
    // 评分细则（标准名 -> 权重）
    pub rubric: Rubric,
    // 作业创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 作业更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
