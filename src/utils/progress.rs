//! # 进度条工具
//!
//! 封装 `indicatif` 提供统一的进度条样式。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};

/// 少于该数量的任务不显示进度条
const MIN_VISIBLE_LEN: u64 = 64;

/// 创建标准进度条
///
/// 任务数很少时返回隐藏的进度条，调用方照常 `inc` 即可。
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    if len < MIN_VISIBLE_LEN {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {per_sec} ({eta}) {msg}",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
