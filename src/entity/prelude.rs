//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::plagiarism_matches::{
    ActiveModel as PlagiarismMatchActiveModel, Entity as PlagiarismMatches,
    Model as PlagiarismMatchModel,
};
pub use super::plagiarism_reports::{
    ActiveModel as PlagiarismReportActiveModel, Entity as PlagiarismReports,
    Model as PlagiarismReportModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
