//! # iq 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/iq.rs`

use super::model::{ModelArgs, OutputFormat};

use clap::Args;
use std::path::PathBuf;

/// iq 子命令参数
#[derive(Args, Debug)]
pub struct IqArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Output file (format auto-detected from extension if --format is not given)
    #[arg(short, long, default_value = "iq.png")]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// q range in Å⁻¹ (e.g., "0.001:0.5")
    #[arg(short, long, default_value = "0.001:0.5")]
    pub range: String,

    /// Number of q points
    #[arg(short = 'n', long, default_value_t = 200)]
    pub points: usize,

    /// Use linear instead of logarithmic q spacing
    #[arg(long, default_value_t = false)]
    pub linear: bool,

    /// Take q values from the first column of a data file instead of --range
    #[arg(long)]
    pub q_file: Option<PathBuf>,

    /// Plot with linear axes instead of log-log
    #[arg(long, default_value_t = false)]
    pub linear_axes: bool,

    /// Number of rows to print in the summary table
    #[arg(long, default_value_t = 10)]
    pub show: usize,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Title for the plot
    #[arg(long)]
    pub title: Option<String>,

    /// Number of parallel threads (0 = auto)
    #[arg(short, long, env = "SANS_JOBS", default_value_t = 0)]
    pub jobs: usize,
}
