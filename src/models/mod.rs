//! 业务数据模型
//!
//! 与 `entity` 中的数据库实体分离，存储层负责两者之间的转换。

pub mod ai;
pub mod assignments;
pub mod grades;
pub mod plagiarism;
pub mod submissions;
