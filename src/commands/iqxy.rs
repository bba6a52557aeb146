//! # iqxy 子命令实现
//!
//! 计算固定取向下的 2D 强度。
//!
//! ## 功能
//! - 探测器平面上的方形 I(qx, qy) 图
//! - `--polar`: 固定 q 的方位角扫描 I(φ), φ ∈ [0, 2π)
//! - 并行求值，输出热图 (PNG/SVG) 或数据文件 (CSV/XY)
//!
//! ## 依赖关系
//! - 使用 `cli/iqxy.rs` 定义的 IqxyArgs
//! - 使用 `commands/setup.rs` 构造模型
//! - 使用 `sans/` 模块导出与绘图

use crate::batch::BatchRunner;
use crate::cli::iqxy::IqxyArgs;
use crate::cli::model::OutputFormat;
use crate::commands::setup;
use crate::error::{Result, SansError};
use crate::models::EllipticalCylinderModel;
use crate::sans::pattern::{self, Abscissa};
use crate::sans::{export, plot, IqCurve, IqMap};
use crate::utils::output;

use std::f64::consts::PI;

/// 执行 iqxy 计算
pub fn execute(args: IqxyArgs) -> Result<()> {
    output::print_header("Elliptical Cylinder I(qx, qy)");

    let model = setup::build_model(&args.model)?;
    let grid_size = model.grid_size_2d();
    output::print_info(&format!("Dispersion grid: {} points", grid_size));

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_extension(&args.output));
    let runner = BatchRunner::new(args.jobs);

    match args.polar {
        Some(q) => polar_sweep(&model, &runner, q, format, &args)?,
        None => detector_map(&model, &runner, format, &args)?,
    }

    output::print_success(&format!("I(qx, qy) saved to '{}'", args.output.display()));
    Ok(())
}

/// 方形探测器图
fn detector_map(
    model: &EllipticalCylinderModel,
    runner: &BatchRunner,
    format: OutputFormat,
    args: &IqxyArgs,
) -> Result<()> {
    let axis = pattern::symmetric_axis(args.q_max, args.points)?;
    let pixels: Vec<(f64, f64)> = axis
        .iter()
        .flat_map(|&qy| axis.iter().map(move |&qx| (qx, qy)))
        .collect();

    output::print_info(&format!(
        "{0}x{0} map, |qx|, |qy| <= {1} Å⁻¹",
        args.points, args.q_max
    ));
    setup::warn_if_large(model.grid_size_2d(), pixels.len());

    let intensity = runner.map(&pixels, "I(qx, qy)", |&(qx, qy)| model.evaluate_2d(qx, qy))?;

    let map = IqMap {
        name: args
            .title
            .clone()
            .unwrap_or_else(|| "elliptical cylinder".to_string()),
        qx: axis.clone(),
        qy: axis,
        intensity,
    };

    match format {
        OutputFormat::Png | OutputFormat::Svg => plot::generate_map_plot(
            &map,
            &args.output,
            &map.name,
            args.width,
            args.height,
            format == OutputFormat::Svg,
        ),
        OutputFormat::Csv => export::map_to_csv(&map, &args.output),
        OutputFormat::Xy => export::map_to_xy(&map, &setup::model_header(model), &args.output),
    }
}

/// 固定 q 的方位角扫描
fn polar_sweep(
    model: &EllipticalCylinderModel,
    runner: &BatchRunner,
    q: f64,
    format: OutputFormat,
    args: &IqxyArgs,
) -> Result<()> {
    if q <= 0.0 || args.points < 2 {
        return Err(SansError::InvalidRange(format!(
            "polar sweep needs q > 0 and at least 2 points (q = {}, points = {})",
            q, args.points
        )));
    }

    let step = 2.0 * PI / args.points as f64;
    let phi: Vec<f64> = (0..args.points).map(|i| step * i as f64).collect();

    output::print_info(&format!("Azimuthal sweep at q = {} Å⁻¹, {} angles", q, phi.len()));
    setup::warn_if_large(model.grid_size_2d(), phi.len());

    let intensity = runner.map(&phi, "I(φ)", |&phi| model.evaluate_polar(q, phi))?;

    let curve = IqCurve {
        name: args
            .title
            .clone()
            .unwrap_or_else(|| format!("elliptical cylinder, q = {}", q)),
        abscissa: Abscissa::Phi,
        points: phi.into_iter().zip(intensity).collect(),
    };

    match format {
        OutputFormat::Png | OutputFormat::Svg => plot::generate_curve_plot(
            &curve,
            &args.output,
            &curve.name,
            args.width,
            args.height,
            false,
            format == OutputFormat::Svg,
        ),
        OutputFormat::Csv => export::curve_to_csv(&curve, &args.output),
        OutputFormat::Xy => {
            export::curve_to_xy(&curve, &setup::model_header(model), &args.output)
        }
    }
}
