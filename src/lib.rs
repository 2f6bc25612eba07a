//! LMS 提交 AI 处理流水线
//!
//! 对每份学生提交：生成文本向量并与同作业其他提交比对相似度（查重），
//! 同时按作业评分细则给出启发式的 AI 预评分。以库的形式供路由层调用。
//!
//! # 架构
//! - `cache`: 解码后向量的内存缓存（Moka）
//! - `config`: 配置管理
//! - `embedding`: 文本向量化（模型后端、懒加载、持久化格式）
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `grading`: 基于评分细则的启发式评分
//! - `models`: 数据模型定义
//! - `runtime`: 日志与启动装配
//! - `services`: 提交 AI 处理编排
//! - `similarity`: 余弦相似度与相似提交匹配
//! - `storage`: 数据存储层（SeaORM / 内存）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod embedding;
pub mod entity;
pub mod errors;
pub mod grading;
pub mod models;
pub mod runtime;
pub mod services;
pub mod similarity;
pub mod storage;
pub mod utils;
