//! # 解析器模块
//!
//! 提供 q 数据、分布点列和参数文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: qdata, weights, param_file

pub mod param_file;
pub mod qdata;
pub mod weights;

pub use qdata::{parse_column_file, ColumnData};
