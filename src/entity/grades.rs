//! 评分实体

use sea_orm::entity::prelude::*;

use crate::errors::PipelineError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    // 流水线写入 "ai"
    pub grader: String,
    pub score: i64,
    pub max_score: i64,
    #[sea_orm(column_type = "Text")]
    pub feedback: String,
    // JSON 对象：标准名 -> 0..100
    #[sea_orm(column_type = "Text")]
    pub rubric_scores: String,
    // JSON 字符串数组
    #[sea_orm(column_type = "Text")]
    pub reasoning: String,
    pub graded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn try_into_grade(self) -> crate::errors::Result<crate::models::grades::entities::Grade> {
        use crate::models::grades::entities::Grade;
        use chrono::{DateTime, Utc};

        Ok(Grade {
            id: self.id,
            submission_id: self.submission_id,
            grader: self
                .grader
                .parse()
                .map_err(PipelineError::serialization)?,
            score: self.score,
            max_score: self.max_score,
            feedback: self.feedback,
            rubric_scores: serde_json::from_str(&self.rubric_scores)?,
            reasoning: serde_json::from_str(&self.reasoning)?,
            graded_at: DateTime::<Utc>::from_timestamp(self.graded_at, 0).unwrap_or_default(),
        })
    }
}
