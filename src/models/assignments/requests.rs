use serde::Deserialize;

use super::rubric::Rubric;
use crate::errors::{PipelineError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub course_id: i64,
    pub title: String,
    pub max_score: i64,
    pub rubric: Rubric,
}

impl CreateAssignmentRequest {
    /// 写入前校验；所有存储后端共用，保证写入的作业都能被读回
    pub fn validate(&self) -> Result<()> {
        if self.max_score <= 0 {
            return Err(PipelineError::validation(format!(
                "作业满分必须为正整数: {}",
                self.max_score
            )));
        }
        self.rubric.validate().map_err(PipelineError::validation)
    }
}
