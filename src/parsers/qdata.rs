//! # q 数据文件解析器
//!
//! 读取列式数值数据文件（实验 q 点或分布点列）。
//!
//! ## 格式说明
//! ```text
//! # comment
//! q        I       dI          <- 无法解析为数字的行视为表头，跳过
//! 0.001    123.4   1.2
//! 0.002,   98.1,   1.0         <- 逗号、分号、空白均可作为分隔符
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/weights.rs` 和 `commands/` 使用
//! - 使用 `regex` 切分列

use crate::error::{Result, SansError};

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s,;]+").unwrap());

/// 列式数据
#[derive(Debug, Clone)]
pub struct ColumnData {
    /// 数据名（文件名主干）
    pub name: String,
    /// 按行存储的数值
    pub rows: Vec<Vec<f64>>,
}

impl ColumnData {
    /// 第 `index` 列
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows.iter().filter_map(|r| r.get(index).copied()).collect()
    }

    /// 最少列数
    pub fn min_columns(&self) -> usize {
        self.rows.iter().map(Vec::len).min().unwrap_or(0)
    }
}

/// 读取数据文件
pub fn parse_column_file(path: &Path) -> Result<ColumnData> {
    let content = fs::read_to_string(path).map_err(|e| SansError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("data");

    parse_column_content(&content, name).map_err(|reason| SansError::ParseError {
        format: "column data".to_string(),
        path: path.display().to_string(),
        reason,
    })
}

/// 从字符串内容解析
pub fn parse_column_content(content: &str, name: &str) -> std::result::Result<ColumnData, String> {
    let mut rows = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }

        let fields: Vec<&str> = SEPARATOR.split(line).filter(|s| !s.is_empty()).collect();
        let values: std::result::Result<Vec<f64>, _> =
            fields.iter().map(|s| s.parse::<f64>()).collect();

        match values {
            Ok(v) if !v.is_empty() => rows.push(v),
            _ if rows.is_empty() => continue, // 表头
            _ => return Err(format!("line {}: non-numeric data '{}'", lineno + 1, line)),
        }
    }

    if rows.is_empty() {
        return Err("no numeric data found".to_string());
    }

    Ok(ColumnData {
        name: name.to_string(),
        rows,
    })
}
