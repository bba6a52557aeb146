//! # iqxy 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/iqxy.rs`

use super::model::{ModelArgs, OutputFormat};

use clap::Args;
use std::path::PathBuf;

/// iqxy 子命令参数
#[derive(Args, Debug)]
pub struct IqxyArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Output file (format auto-detected from extension if --format is not given)
    #[arg(short, long, default_value = "iqxy.png")]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Half-width of the square detector map in Å⁻¹
    #[arg(long, default_value_t = 0.1)]
    pub q_max: f64,

    /// Points per axis (map) or azimuthal points (--polar)
    #[arg(short = 'n', long, default_value_t = 101)]
    pub points: usize,

    /// Sweep the azimuthal angle at this fixed q (Å⁻¹) instead of computing a map
    #[arg(long)]
    pub polar: Option<f64>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 900)]
    pub height: u32,

    /// Title for the plot
    #[arg(long)]
    pub title: Option<String>,

    /// Number of parallel threads (0 = auto)
    #[arg(short, long, env = "SANS_JOBS", default_value_t = 0)]
    pub jobs: usize,
}
