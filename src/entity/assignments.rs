//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub max_score: i64,
    // JSON 对象：标准名 -> 权重
    #[sea_orm(column_type = "Text")]
    pub rubric: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn try_into_assignment(
        self,
    ) -> crate::errors::Result<crate::models::assignments::entities::Assignment> {
        use crate::models::assignments::entities::Assignment;
        use chrono::{DateTime, Utc};

        Ok(Assignment {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            max_score: self.max_score,
            rubric: serde_json::from_str(&self.rubric)?,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        })
    }
}
