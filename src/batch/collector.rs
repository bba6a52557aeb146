//! # 文件收集器
//!
//! 根据输入路径和模式收集待处理的数据文件。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - glob 模式匹配（逗号分隔多个模式）
//! - 递归目录搜索
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{Result, SansError};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    input: PathBuf,
    patterns: Vec<Pattern>,
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器（默认匹配所有文件）
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    SansError::InvalidArgument(format!("bad glob pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件（按路径排序）
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }

        if !self.input.is_dir() {
            return Err(SansError::DirectoryNotFound {
                path: self.input.display().to_string(),
            });
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches_patterns(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }

    /// 检查文件名是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_pattern_matching() {
        let collector = FileCollector::new(PathBuf::from("."))
            .with_pattern("*.dat, run?.txt")
            .unwrap();
        assert!(collector.matches_patterns(Path::new("dir/sample.dat")));
        assert!(collector.matches_patterns(Path::new("run1.txt")));
        assert!(!collector.matches_patterns(Path::new("run12.txt")));
        assert!(!collector.matches_patterns(Path::new("sample.csv")));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(FileCollector::new(PathBuf::from(".")).with_pattern("[").is_err());
    }

    #[test]
    fn test_collect_directory() {
        let dir = std::env::temp_dir().join(format!("sansmodel_collect_{}", std::process::id()));
        fs::create_dir_all(dir.join("sub")).unwrap();
        fs::write(dir.join("b.dat"), "0.1 1").unwrap();
        fs::write(dir.join("a.dat"), "0.1 1").unwrap();
        fs::write(dir.join("notes.md"), "").unwrap();
        fs::write(dir.join("sub").join("c.dat"), "0.1 1").unwrap();

        let flat = FileCollector::new(dir.clone())
            .with_pattern("*.dat")
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(flat, vec![dir.join("a.dat"), dir.join("b.dat")]);

        let deep = FileCollector::new(dir.clone())
            .with_pattern("*.dat")
            .unwrap()
            .recursive(true)
            .collect()
            .unwrap();
        assert_eq!(deep.len(), 3);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_input() {
        let missing = FileCollector::new(PathBuf::from("/nonexistent/sansmodel")).collect();
        assert!(matches!(missing, Err(SansError::DirectoryNotFound { .. })));
    }
}
