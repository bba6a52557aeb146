//! # SANS 数据导出
//!
//! 导出散射强度到 CSV 和 XY 格式。
//!
//! ## 支持格式
//! - CSV: 1D 为 q, intensity；2D 为 qx, qy, intensity
//! - XY: 以 `#` 开头的注释头（模型参数），其后为制表符分隔的数据列
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `sans/pattern.rs` 的 IqCurve, IqMap 结构
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{Result, SansError};
use crate::sans::{IqCurve, IqMap};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn write_error(path: &Path) -> impl Fn(std::io::Error) -> SansError + '_ {
    move |e| SansError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    }
}

/// 导出 1D 曲线为 CSV
pub fn curve_to_csv(curve: &IqCurve, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record([curve.abscissa.name(), "intensity"])?;
    for (q, intensity) in &curve.points {
        wtr.write_record(&[format!("{:.6e}", q), format!("{:.6e}", intensity)])?;
    }

    wtr.flush().map_err(write_error(output_path))?;
    Ok(())
}

/// 导出 1D 曲线为 XY 格式
pub fn curve_to_xy(curve: &IqCurve, header: &[String], output_path: &Path) -> Result<()> {
    let file = File::create(output_path).map_err(write_error(output_path))?;
    let mut out = BufWriter::new(file);

    let title = format!("I({}): {}", curve.abscissa.name(), curve.name);
    write_header(&mut out, &title, header).map_err(write_error(output_path))?;
    writeln!(out, "# Columns: {}, I (1/cm)", curve.abscissa.column_label())
        .map_err(write_error(output_path))?;
    writeln!(out, "#").map_err(write_error(output_path))?;

    for (q, intensity) in &curve.points {
        writeln!(out, "{:.6e}\t{:.6e}", q, intensity).map_err(write_error(output_path))?;
    }

    out.flush().map_err(write_error(output_path))?;
    Ok(())
}

/// 导出 2D 强度图为 CSV
pub fn map_to_csv(map: &IqMap, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["qx", "qy", "intensity"])?;
    for (qx, qy, intensity) in map.triples() {
        wtr.write_record(&[
            format!("{:.6e}", qx),
            format!("{:.6e}", qy),
            format!("{:.6e}", intensity),
        ])?;
    }

    wtr.flush().map_err(write_error(output_path))?;
    Ok(())
}

/// 导出 2D 强度图为 XY 格式（三列）
pub fn map_to_xy(map: &IqMap, header: &[String], output_path: &Path) -> Result<()> {
    let file = File::create(output_path).map_err(write_error(output_path))?;
    let mut out = BufWriter::new(file);

    write_header(&mut out, &format!("I(qx, qy): {}", map.name), header)
        .map_err(write_error(output_path))?;
    writeln!(out, "# Columns: qx (1/Angstrom), qy (1/Angstrom), I (1/cm)")
        .map_err(write_error(output_path))?;
    writeln!(out, "#").map_err(write_error(output_path))?;

    for (qx, qy, intensity) in map.triples() {
        writeln!(out, "{:.6e}\t{:.6e}\t{:.6e}", qx, qy, intensity)
            .map_err(write_error(output_path))?;
    }

    out.flush().map_err(write_error(output_path))?;
    Ok(())
}

fn write_header<W: Write>(out: &mut W, title: &str, header: &[String]) -> std::io::Result<()> {
    writeln!(out, "# {}", title)?;
    for line in header {
        writeln!(out, "# {}", line)?;
    }
    Ok(())
}
