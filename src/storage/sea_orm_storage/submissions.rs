//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{PipelineError, Result};
use crate::models::submissions::{
    entities::{EmbeddedSubmission, Submission, SubmissionStatus},
    requests::CreateSubmissionRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(&self, req: CreateSubmissionRequest) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(req.assignment_id),
            creator_id: Set(req.creator_id),
            content: Set(req.content),
            embedding: Set(None),
            status: Set(SubmissionStatus::Pending.to_string()),
            submitted_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PipelineError::database_operation(format!("创建提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| PipelineError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 写入提交向量
    pub async fn update_submission_embedding_impl(
        &self,
        submission_id: i64,
        embedding: Vec<u8>,
    ) -> Result<bool> {
        let model = ActiveModel {
            embedding: Set(Some(embedding)),
            ..Default::default()
        };

        let result = Submissions::update_many()
            .set(model)
            .filter(Column::Id.eq(submission_id))
            .exec(&self.db)
            .await
            .map_err(|e| PipelineError::database_operation(format!("更新提交向量失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出同一作业下其他已有向量的提交
    pub async fn list_submissions_with_embedding_impl(
        &self,
        assignment_id: i64,
        exclude_submission_id: i64,
    ) -> Result<Vec<EmbeddedSubmission>> {
        let results = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::Id.ne(exclude_submission_id))
            .filter(Column::Embedding.is_not_null())
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PipelineError::database_operation(format!("查询兄弟提交失败: {e}")))?;

        Ok(results
            .into_iter()
            .filter_map(|m| {
                m.embedding.map(|embedding| EmbeddedSubmission {
                    id: m.id,
                    creator_id: m.creator_id,
                    content: m.content,
                    embedding,
                })
            })
            .collect())
    }
}
