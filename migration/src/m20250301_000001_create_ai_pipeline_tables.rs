use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建作业表（课程表由外部系统维护，不建外键）
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::MaxScore).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::Rubric).text().not_null())
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建提交表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Submissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::CreatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::Content).text().not_null())
                    .col(ColumnDef::new(Submissions::Embedding).blob().null())
                    .col(ColumnDef::new(Submissions::Status).string().not_null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建查重报告表
        manager
            .create_table(
                Table::create()
                    .table(PlagiarismReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlagiarismReports::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismReports::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismReports::HighestSimilarity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismReports::IsFlagged)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismReports::CheckedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PlagiarismReports::Table, PlagiarismReports::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建查重匹配明细表
        manager
            .create_table(
                Table::create()
                    .table(PlagiarismMatches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlagiarismMatches::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismMatches::ReportId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismMatches::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismMatches::MatchedSubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismMatches::MatchedStudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismMatches::Similarity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlagiarismMatches::ContentSnippet)
                            .text()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PlagiarismMatches::Table, PlagiarismMatches::ReportId)
                            .to(PlagiarismReports::Table, PlagiarismReports::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评分表
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Grades::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Grades::Grader).string().not_null())
                    .col(ColumnDef::new(Grades::Score).big_integer().not_null())
                    .col(ColumnDef::new(Grades::MaxScore).big_integer().not_null())
                    .col(ColumnDef::new(Grades::Feedback).text().not_null())
                    .col(ColumnDef::new(Grades::RubricScores).text().not_null())
                    .col(ColumnDef::new(Grades::Reasoning).text().not_null())
                    .col(ColumnDef::new(Grades::GradedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 同一作业下的兄弟提交查询
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_assignment_id")
                    .table(Submissions::Table)
                    .col(Submissions::AssignmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_plagiarism_reports_submission_id")
                    .table(PlagiarismReports::Table)
                    .col(PlagiarismReports::SubmissionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_plagiarism_matches_report_id")
                    .table(PlagiarismMatches::Table)
                    .col(PlagiarismMatches::ReportId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_submission_id")
                    .table(Grades::Table)
                    .col(Grades::SubmissionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlagiarismMatches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlagiarismReports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    CourseId,
    Title,
    MaxScore,
    Rubric,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    AssignmentId,
    CreatorId,
    Content,
    Embedding,
    Status,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum PlagiarismReports {
    #[sea_orm(iden = "plagiarism_reports")]
    Table,
    Id,
    SubmissionId,
    HighestSimilarity,
    IsFlagged,
    CheckedAt,
}

#[derive(DeriveIden)]
enum PlagiarismMatches {
    #[sea_orm(iden = "plagiarism_matches")]
    Table,
    Id,
    ReportId,
    Position,
    MatchedSubmissionId,
    MatchedStudentId,
    Similarity,
    ContentSnippet,
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Id,
    SubmissionId,
    Grader,
    Score,
    MaxScore,
    Feedback,
    RubricScores,
    Reasoning,
    GradedAt,
}
