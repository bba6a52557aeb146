//! # info 子命令实现
//!
//! 显示模型参数、分布设置和求积网格规模。
//!
//! ## 依赖关系
//! - 使用 `cli/mod.rs` 定义的 InfoArgs
//! - 使用 `commands/setup.rs` 构造模型

use crate::cli::InfoArgs;
use crate::commands::setup;
use crate::error::Result;
use crate::models::EllipticalCylinderModel;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 参数表格行
#[derive(Debug, Clone, Tabled)]
struct ParamRow {
    #[tabled(rename = "Parameter")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Dispersion")]
    dispersion: String,
    #[tabled(rename = "Points")]
    points: usize,
}

/// 执行 info
pub fn execute(args: InfoArgs) -> Result<()> {
    output::print_header("Elliptical Cylinder Model");

    let model = setup::build_model(&args.model)?;
    println!("{}", Table::new(parameter_rows(&model)));

    output::print_separator();
    output::print_detail("Gauss points", &model.kernel().gauss_points().to_string());
    output::print_detail("1D grid", &model.grid_size_1d().to_string());
    output::print_detail("2D grid", &model.grid_size_2d().to_string());
    match model.effective_radius() {
        Ok(r) => output::print_detail("Effective radius", &format!("{} Å", r)),
        Err(e) => output::print_detail("Effective radius", &e.to_string()),
    }

    setup::warn_if_large(model.grid_size_2d(), 1);
    Ok(())
}

fn parameter_rows(model: &EllipticalCylinderModel) -> Vec<ParamRow> {
    model
        .params()
        .into_iter()
        .map(|p| ParamRow {
            name: p.name.to_string(),
            value: format!("{}", p.value()),
            unit: p.unit.to_string(),
            min: p.min().map_or_else(|| "-".to_string(), |m| m.to_string()),
            dispersion: match p.dispersion() {
                Some(d) => d.describe(),
                None if p.is_dispersible() => "none".to_string(),
                None => "-".to_string(),
            },
            points: p.get_weights().len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dispersion, DispersionKind};

    #[test]
    fn test_parameter_rows() {
        let mut model = EllipticalCylinderModel::new();
        model
            .set_dispersion("length", Dispersion::parametric(DispersionKind::Rectangle, 50.0))
            .unwrap();

        let rows = parameter_rows(&model);
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0].dispersion, "-");
        assert_eq!(rows[1].dispersion, "none");
        assert_eq!(rows[1].min, "0");
        assert_eq!(rows[3].points, 35);
        assert!(rows[3].dispersion.starts_with("rectangle("));
    }
}
