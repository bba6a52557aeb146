//! # iq 子命令实现
//!
//! 在 q 网格（或数据文件给出的 q 点）上计算取向平均的 1D 强度。
//!
//! ## 功能
//! - 对数或线性 q 网格
//! - 并行求值（rayon）
//! - 输出图像 (PNG/SVG) 或数据文件 (CSV/XY)
//!
//! ## 依赖关系
//! - 使用 `cli/iq.rs` 定义的 IqArgs
//! - 使用 `commands/setup.rs` 构造模型
//! - 使用 `sans/` 模块导出与绘图

use crate::batch::BatchRunner;
use crate::cli::iq::IqArgs;
use crate::cli::model::OutputFormat;
use crate::commands::setup;
use crate::error::{Result, SansError};
use crate::parsers;
use crate::sans::pattern::{self, Abscissa};
use crate::sans::{export, plot, IqCurve};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 执行 iq 计算
pub fn execute(args: IqArgs) -> Result<()> {
    output::print_header("Elliptical Cylinder I(q)");

    let model = setup::build_model(&args.model)?;
    let q = q_values(&args)?;

    output::print_info(&format!(
        "{} q points in [{:.4e}, {:.4e}] Å⁻¹",
        q.len(),
        q.first().copied().unwrap_or(0.0),
        q.last().copied().unwrap_or(0.0)
    ));
    let grid_size = model.grid_size_1d();
    output::print_info(&format!("Dispersion grid: {} points", grid_size));
    setup::warn_if_large(grid_size, q.len());

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Evaluating on {} threads", runner.jobs()));
    let intensity = runner.map(&q, "I(q)", |&q| model.evaluate_1d(q))?;

    let curve = IqCurve {
        name: args
            .title
            .clone()
            .unwrap_or_else(|| "elliptical cylinder".to_string()),
        abscissa: Abscissa::Q,
        points: q.into_iter().zip(intensity).collect(),
    };

    let non_finite = curve.points.iter().filter(|(_, i)| !i.is_finite()).count();
    if non_finite > 0 {
        output::print_warning(&format!("{} points evaluated to NaN or infinity", non_finite));
    }

    print_curve_table(&curve, args.show);

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_extension(&args.output));

    match format {
        OutputFormat::Png | OutputFormat::Svg => plot::generate_curve_plot(
            &curve,
            &args.output,
            &curve.name,
            args.width,
            args.height,
            !args.linear_axes,
            format == OutputFormat::Svg,
        )?,
        OutputFormat::Csv => export::curve_to_csv(&curve, &args.output)?,
        OutputFormat::Xy => {
            export::curve_to_xy(&curve, &setup::model_header(&model), &args.output)?
        }
    }

    output::print_success(&format!("I(q) saved to '{}'", args.output.display()));
    Ok(())
}

/// 确定求值的 q 点
fn q_values(args: &IqArgs) -> Result<Vec<f64>> {
    match args.q_file {
        Some(ref path) => {
            let data = parsers::parse_column_file(path)?;
            let q = data.column(0);
            if q.is_empty() {
                return Err(SansError::ParseError {
                    format: "column data".to_string(),
                    path: path.display().to_string(),
                    reason: "no q values found".to_string(),
                });
            }
            output::print_info(&format!("q values taken from '{}'", data.name));
            Ok(q)
        }
        None => {
            let (q_min, q_max) = pattern::parse_range(&args.range)?;
            pattern::q_grid(q_min, q_max, args.points, !args.linear)
        }
    }
}

/// 打印曲线前若干行
fn print_curve_table(curve: &IqCurve, count: usize) {
    #[derive(Tabled)]
    struct IqRow {
        #[tabled(rename = "q (Å⁻¹)")]
        q: String,
        #[tabled(rename = "I (cm⁻¹)")]
        intensity: String,
    }

    let rows: Vec<IqRow> = curve
        .points
        .iter()
        .take(count)
        .map(|(q, i)| IqRow {
            q: format!("{:.5e}", q),
            intensity: format!("{:.5e}", i),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("First {} of {} points", rows.len(), curve.points.len()));
        println!("{}", Table::new(&rows));
    }
}
