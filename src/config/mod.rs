//! 配置管理
//!
//! 静态配置来自配置文件与环境变量，启动后只读。

mod r#impl;
mod structs;

pub use structs::*;
