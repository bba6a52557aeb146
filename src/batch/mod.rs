//! # 批量处理模块
//!
//! 提供文件收集与并行执行能力。
//!
//! ## 功能
//! - 收集匹配的数据文件列表
//! - 并行处理文件或 q 点
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchRunner, ProcessResult};
