//! 提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub creator_id: i64,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    // 编码后的向量，格式见 embedding::codec
    pub embedding: Option<Vec<u8>>,
    pub status: String,
    pub submitted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
    #[sea_orm(has_many = "super::plagiarism_reports::Entity")]
    PlagiarismReports,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl Related<super::plagiarism_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlagiarismReports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        use crate::models::submissions::entities::{Submission, SubmissionStatus};
        use chrono::{DateTime, Utc};

        Submission {
            id: self.id,
            assignment_id: self.assignment_id,
            creator_id: self.creator_id,
            content: self.content,
            embedding: self.embedding,
            status: self.status.parse().unwrap_or(SubmissionStatus::Pending),
            submitted_at: DateTime::<Utc>::from_timestamp(self.submitted_at, 0)
                .unwrap_or_default(),
        }
    }
}
