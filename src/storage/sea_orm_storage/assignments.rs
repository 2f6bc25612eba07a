//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Entity as Assignments};
use crate::errors::{PipelineError, Result};
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        req.validate()?;

        let now = chrono::Utc::now().timestamp();
        let rubric = serde_json::to_string(&req.rubric)?;

        let model = ActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.title),
            max_score: Set(req.max_score),
            rubric: Set(rubric),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PipelineError::database_operation(format!("创建作业失败: {e}")))?;

        result.try_into_assignment()
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| PipelineError::database_operation(format!("查询作业失败: {e}")))?;

        result.map(|m| m.try_into_assignment()).transpose()
    }
}
