//! # SANS 图表生成
//!
//! 使用 `plotters` 库生成散射强度图。
//!
//! ## 功能
//! - 1D 曲线：对数-对数坐标（默认）或线性坐标
//! - 2D 强度图：log10(I) 热图
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `sans/pattern.rs` 的 IqCurve, IqMap 结构
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, SansError};
use crate::sans::{IqCurve, IqMap};

use plotters::prelude::*;
use std::path::Path;

fn plot_err<E: std::fmt::Debug>(e: E) -> SansError {
    SansError::PlotError(format!("{:?}", e))
}

/// 生成 1D I(q) 图
pub fn generate_curve_plot(
    curve: &IqCurve,
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    log_scale: bool,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_curve_chart(&root, curve, title, log_scale)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_curve_chart(&root, curve, title, log_scale)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

/// 生成 2D I(qx, qy) 热图
pub fn generate_map_plot(
    map: &IqMap,
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_map_chart(&root, map, title)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_map_chart(&root, map, title)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

/// 绘制 1D 曲线
fn draw_curve_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    curve: &IqCurve,
    title: &str,
    log_scale: bool,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    // 对数坐标只能显示正值
    let points: Vec<(f64, f64)> = curve
        .points
        .iter()
        .copied()
        .filter(|(q, i)| i.is_finite() && (!log_scale || (*q > 0.0 && *i > 0.0)))
        .collect();

    if points.is_empty() {
        return Err(SansError::PlotError(
            "no plottable points (log scale needs q > 0 and I > 0)".to_string(),
        ));
    }

    let x_min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let x_max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let y_min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let x_max = if x_max > x_min { x_max } else { x_min * 1.1 + 1e-6 };

    let line_color = RGBColor(0, 102, 204);

    if log_scale {
        let y_max = if y_max > y_min { y_max } else { y_min * 10.0 };
        let mut chart = ChartBuilder::on(root)
            .caption(title, ("sans-serif", 28).into_font())
            .margin(30)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(
                (x_min..x_max).log_scale(),
                (y_min * 0.5..y_max * 2.0).log_scale(),
            )
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc(curve.abscissa.axis_label())
            .y_desc("I (cm⁻¹)")
            .x_label_style(("sans-serif", 16))
            .y_label_style(("sans-serif", 16))
            .axis_desc_style(("sans-serif", 18))
            .x_label_formatter(&|x| format!("{:.0e}", x))
            .y_label_formatter(&|y| format!("{:.0e}", y))
            .draw()
            .map_err(plot_err)?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_color.stroke_width(2)))
            .map_err(plot_err)?;
    } else {
        let span = (y_max - y_min).max(y_max.abs() * 1e-3).max(1e-12);
        let mut chart = ChartBuilder::on(root)
            .caption(title, ("sans-serif", 28).into_font())
            .margin(30)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(x_min..x_max, (y_min - 0.05 * span)..(y_max + 0.05 * span))
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc(curve.abscissa.axis_label())
            .y_desc("I (cm⁻¹)")
            .x_label_style(("sans-serif", 16))
            .y_label_style(("sans-serif", 16))
            .axis_desc_style(("sans-serif", 18))
            .draw()
            .map_err(plot_err)?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_color.stroke_width(2)))
            .map_err(plot_err)?;
    }

    Ok(())
}

/// 绘制 2D 热图
fn draw_map_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    map: &IqMap,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    if map.qx.len() < 2 || map.qy.len() < 2 {
        return Err(SansError::PlotError("map needs at least 2x2 points".to_string()));
    }

    let dx = (map.qx[map.qx.len() - 1] - map.qx[0]) / (map.qx.len() - 1) as f64;
    let dy = (map.qy[map.qy.len() - 1] - map.qy[0]) / (map.qy.len() - 1) as f64;
    let x_range = (map.qx[0] - dx / 2.0)..(map.qx[map.qx.len() - 1] + dx / 2.0);
    let y_range = (map.qy[0] - dy / 2.0)..(map.qy[map.qy.len() - 1] + dy / 2.0);

    let logs: Vec<f64> = map
        .intensity
        .iter()
        .map(|&v| if v > 0.0 { v.log10() } else { f64::NAN })
        .collect();
    let lo = logs
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::INFINITY, f64::min);
    let hi = logs
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    let span = if hi > lo { hi - lo } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("qx (Å⁻¹)")
        .y_desc("qy (Å⁻¹)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    let cells = map.triples().zip(logs.iter()).map(|((qx, qy, _), &l)| {
        let color = if l.is_finite() {
            colormap((l - lo) / span)
        } else {
            RGBColor(0, 0, 0)
        };
        Rectangle::new(
            [
                (qx - dx / 2.0, qy - dy / 2.0),
                (qx + dx / 2.0, qy + dy / 2.0),
            ],
            color.filled(),
        )
    });
    chart.draw_series(cells).map_err(plot_err)?;

    if lo.is_finite() {
        let legend = format!("log10 I: {:.2} .. {:.2}", lo, hi);
        root.draw(&Text::new(
            legend,
            (40, 10),
            ("sans-serif", 14).into_font().color(&BLACK),
        ))
        .map_err(plot_err)?;
    }

    Ok(())
}

/// 近似 viridis 的分段线性色图，t ∈ [0, 1]
fn colormap(t: f64) -> RGBColor {
    const ANCHORS: [(f64, f64, f64); 5] = [
        (68.0, 1.0, 84.0),
        (59.0, 82.0, 139.0),
        (33.0, 145.0, 140.0),
        (94.0, 201.0, 98.0),
        (253.0, 231.0, 37.0),
    ];

    let t = t.clamp(0.0, 1.0) * (ANCHORS.len() - 1) as f64;
    let i = (t.floor() as usize).min(ANCHORS.len() - 2);
    let f = t - i as f64;
    let (a, b) = (ANCHORS[i], ANCHORS[i + 1]);
    let mix = |x: f64, y: f64| (x + (y - x) * f).round() as u8;

    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
