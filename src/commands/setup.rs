//! # 模型构造
//!
//! 把命令行参数转换为配置好的 `EllipticalCylinderModel`，供各子命令共用。
//!
//! ## 依赖关系
//! - 使用 `cli/model.rs` 的 ModelArgs
//! - 使用 `parsers/` 读取参数文件和分布点列

use crate::cli::model::{split_assignment, ModelArgs};
use crate::error::{Result, SansError};
use crate::models::{Dispersion, EllipticalCylinderModel};
use crate::parsers::param_file;
use crate::parsers::weights::parse_weights_file;
use crate::sans::{AnalyticKernel, ScatteringKernel};
use crate::utils::output;

use std::path::Path;

/// 超过该点数的求积网格给出警告
pub const LARGE_GRID: usize = 1_000_000;

/// 按 参数文件 → 参数值 → 分布 → 点列文件 的顺序构造模型并校验
pub fn build_model(args: &ModelArgs) -> Result<EllipticalCylinderModel> {
    if args.gauss_points == 0 {
        return Err(SansError::InvalidArgument(
            "--gauss-points must be at least 1".to_string(),
        ));
    }

    let mut model = EllipticalCylinderModel::with_kernel(AnalyticKernel::new(args.gauss_points));

    if let Some(ref path) = args.param_file {
        let rows = param_file::read_param_file(path)?;
        param_file::apply_rows(&rows, &mut model)?;
        output::print_info(&format!(
            "Loaded {} parameter rows from '{}'",
            rows.len(),
            path.display()
        ));
    }

    for (name, value) in args.explicit_values() {
        model.set_param(name, value)?;
    }

    for spec in &args.disperse {
        let (name, dist) = split_assignment(spec).ok_or_else(|| {
            SansError::InvalidDispersion(format!("expected PARAM=SPEC, got '{}'", spec))
        })?;
        model.set_dispersion(name, Dispersion::from_spec(dist)?)?;
    }

    for spec in &args.weights {
        let (name, file) = split_assignment(spec).ok_or_else(|| {
            SansError::InvalidDispersion(format!("expected PARAM=FILE, got '{}'", spec))
        })?;
        let points = parse_weights_file(Path::new(file))?;
        model.set_dispersion(name, Dispersion::Array(points))?;
    }

    model.validate()?;
    Ok(model)
}

/// 参数摘要，写入 XY 文件头
pub fn model_header<K: ScatteringKernel>(model: &EllipticalCylinderModel<K>) -> Vec<String> {
    model
        .params()
        .into_iter()
        .map(|p| {
            let unit = if p.unit.is_empty() {
                String::new()
            } else {
                format!(" {}", p.unit)
            };
            match p.dispersion() {
                Some(d) => format!("{} = {}{}  {}", p.name, p.value(), unit, d.describe()),
                None => format!("{} = {}{}", p.name, p.value(), unit),
            }
        })
        .collect()
}

/// 网格过大时给出警告
pub fn warn_if_large(grid_size: usize, evaluations: usize) {
    if grid_size > LARGE_GRID {
        output::print_warning(&format!(
            "Quadrature grid has {} points; {} evaluations need {} kernel calls",
            grid_size,
            evaluations,
            grid_size.saturating_mul(evaluations)
        ));
    }
}
