//! 查重匹配明细实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "plagiarism_matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub report_id: i64,
    // 在报告中的排名（0 起）
    pub position: i32,
    pub matched_submission_id: i64,
    pub matched_student_id: i64,
    pub similarity: i32,
    #[sea_orm(column_type = "Text")]
    pub content_snippet: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::plagiarism_reports::Entity",
        from = "Column::ReportId",
        to = "super::plagiarism_reports::Column::Id"
    )]
    Report,
}

impl Related<super::plagiarism_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Report.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_match(self) -> crate::models::plagiarism::entities::PlagiarismMatch {
        crate::models::plagiarism::entities::PlagiarismMatch {
            submission_id: self.matched_submission_id,
            student_id: self.matched_student_id,
            similarity: self.similarity,
            content: self.content_snippet,
        }
    }
}
