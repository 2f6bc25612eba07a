use std::collections::BTreeMap;

use super::entities::GraderIdentity;

#[derive(Debug, Clone)]
pub struct CreateGradeRequest {
    pub submission_id: i64,
    pub grader: GraderIdentity,
    pub score: i64,
    pub max_score: i64,
    pub feedback: String,
    pub rubric_scores: BTreeMap<String, u32>,
    pub reasoning: Vec<String>,
}
