//! 评分存储操作

use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{PipelineError, Result};
use crate::models::grades::{entities::Grade, requests::CreateGradeRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建评分
    pub async fn create_grade_impl(&self, req: CreateGradeRequest) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            submission_id: Set(req.submission_id),
            grader: Set(req.grader.to_string()),
            score: Set(req.score),
            max_score: Set(req.max_score),
            feedback: Set(req.feedback),
            rubric_scores: Set(serde_json::to_string(&req.rubric_scores)?),
            reasoning: Set(serde_json::to_string(&req.reasoning)?),
            graded_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PipelineError::database_operation(format!("创建评分失败: {e}")))?;

        result.try_into_grade()
    }

    /// 列出提交的评分
    pub async fn list_grades_by_submission_impl(&self, submission_id: i64) -> Result<Vec<Grade>> {
        let results = Grades::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PipelineError::database_operation(format!("查询评分失败: {e}")))?;

        results.into_iter().map(|m| m.try_into_grade()).collect()
    }
}
