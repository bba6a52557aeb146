//! # 统一错误处理模块
//!
//! 定义 sansmodel 的所有错误类型，使用 `thiserror` 派生。
//!
//! 模型求值本身不会失败（直接返回 `f64`），这里的错误只出现在
//! 参数配置、分布校验以及文件读写阶段。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// sansmodel 统一错误类型
#[derive(Error, Debug)]
pub enum SansError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 模型参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown parameter {0}")]
    UnknownParameter(String),

    #[error("Parameter '{name}' = {value} is below its minimum {min}")]
    BelowMinimum { name: String, value: f64, min: f64 },

    #[error("Parameter '{0}' does not accept a dispersion")]
    NotDispersible(String),

    #[error("Invalid dispersion specification: {0}")]
    InvalidDispersion(String),

    #[error("Distribution of '{name}' is degenerate: {reason}")]
    DegenerateDistribution { name: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid q range: {0}")]
    InvalidRange(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    // ─────────────────────────────────────────────────────────────
    // CSV / 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plotting failed: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SansError>;
