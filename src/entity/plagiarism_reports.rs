//! 查重报告实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "plagiarism_reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    pub highest_similarity: i32,
    pub is_flagged: bool,
    pub checked_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
    #[sea_orm(has_many = "super::plagiarism_matches::Entity")]
    Matches,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl Related<super::plagiarism_matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 组装报告，`matches` 需已按 position 排序
    pub fn into_report(
        self,
        matches: Vec<super::plagiarism_matches::Model>,
    ) -> crate::models::plagiarism::entities::PlagiarismReport {
        use crate::models::plagiarism::entities::PlagiarismReport;
        use chrono::{DateTime, Utc};

        PlagiarismReport {
            id: self.id,
            submission_id: self.submission_id,
            matches: matches.into_iter().map(|m| m.into_match()).collect(),
            highest_similarity: self.highest_similarity,
            is_flagged: self.is_flagged,
            checked_at: DateTime::<Utc>::from_timestamp(self.checked_at, 0).unwrap_or_default(),
        }
    }
}
