//! # batch 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use super::model::ModelArgs;

use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Data file or directory of data files (q in the first column)
    pub input: PathBuf,

    /// Output directory for the <name>_model.csv files
    #[arg(short, long, default_value = "model_output")]
    pub output: PathBuf,

    /// Glob pattern for input files (comma separated)
    #[arg(long, default_value = "*.dat,*.txt,*.csv,*.xy")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, env = "SANS_JOBS", default_value_t = 0)]
    pub jobs: usize,
}
