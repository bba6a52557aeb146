//! # 模型参数 CLI 定义
//!
//! 各子命令共享的模型参数、分布设置和输出格式。
//!
//! 参数的生效顺序：`--param-file` → 单独的参数选项 → `--disperse` → `--weights`。
//!
//! ## 依赖关系
//! - 被 `cli/` 各子命令展开 (flatten)
//! - 由 `commands/setup.rs` 转换为模型

use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

/// 模型参数
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Scale factor (volume fraction)
    #[arg(long)]
    pub scale: Option<f64>,

    /// Minor radius of the elliptical cross-section in Å [default: 20]
    #[arg(long)]
    pub r_minor: Option<f64>,

    /// Ratio of major to minor radius [default: 1.5]
    #[arg(long)]
    pub r_ratio: Option<f64>,

    /// Cylinder length in Å [default: 400]
    #[arg(long)]
    pub length: Option<f64>,

    /// Scattering length density contrast in Å⁻² [default: 3e-6]
    #[arg(long, allow_negative_numbers = true)]
    pub contrast: Option<f64>,

    /// Incoherent background in cm⁻¹ [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    pub background: Option<f64>,

    /// Polar angle of the cylinder axis in rad [default: 1.57]
    #[arg(long, allow_negative_numbers = true)]
    pub cyl_theta: Option<f64>,

    /// Azimuthal angle of the cylinder axis in rad [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    pub cyl_phi: Option<f64>,

    /// Rotation of the cross-section major axis in rad [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    pub cyl_psi: Option<f64>,

    /// Parameter dispersion, e.g. "r_minor=gaussian(2.0,35,3)" (repeatable)
    #[arg(long = "disperse", value_name = "PARAM=KIND(WIDTH[,NPTS[,NSIGMAS]])")]
    pub disperse: Vec<String>,

    /// Explicit weight table for a parameter, e.g. "length=weights.txt" (repeatable)
    #[arg(long = "weights", value_name = "PARAM=FILE")]
    pub weights: Vec<String>,

    /// CSV file with columns name,value[,dispersion,width,npts,nsigmas]
    #[arg(long)]
    pub param_file: Option<PathBuf>,

    /// Gauss-Legendre points of the orientation integrals
    #[arg(long, env = "SANS_GAUSS_POINTS", default_value_t = 20)]
    pub gauss_points: usize,
}

impl ModelArgs {
    /// 命令行上直接给出的参数值（按模型参数顺序）
    pub fn explicit_values(&self) -> Vec<(&'static str, f64)> {
        [
            ("scale", self.scale),
            ("r_minor", self.r_minor),
            ("r_ratio", self.r_ratio),
            ("length", self.length),
            ("contrast", self.contrast),
            ("background", self.background),
            ("cyl_theta", self.cyl_theta),
            ("cyl_phi", self.cyl_phi),
            ("cyl_psi", self.cyl_psi),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

/// 拆分 "name=value" 形式的赋值
pub fn split_assignment(input: &str) -> Option<(&str, &str)> {
    let (name, value) = input.split_once('=')?;
    let (name, value) = (name.trim(), value.trim());
    if name.is_empty() || value.is_empty() {
        None
    } else {
        Some((name, value))
    }
}

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
    /// CSV data file
    Csv,
    /// XY data file with a commented parameter header
    Xy,
}

impl OutputFormat {
    /// 根据扩展名推断输出格式
    pub fn from_extension(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("svg") => OutputFormat::Svg,
            Some("csv") => OutputFormat::Csv,
            Some("xy") | Some("dat") | Some("txt") => OutputFormat::Xy,
            _ => OutputFormat::Png,
        }
    }
}
