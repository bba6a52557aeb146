//! # batch 子命令实现
//!
//! 对目录中每个实验数据文件，在其 q 点上计算 1D 模型强度，
//! 写出 `<name>_model.csv`（q, data, model 三列，无数据列时为两列）。
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的 BatchArgs
//! - 使用 `batch/` 模块收集文件并并行处理
//! - 使用 `parsers/qdata.rs` 读取 q 点

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::batch::BatchArgs;
use crate::commands::setup;
use crate::error::{Result, SansError};
use crate::models::EllipticalCylinderModel;
use crate::parsers::{self, ColumnData};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 执行批量计算
pub fn execute(args: BatchArgs) -> Result<()> {
    output::print_header("Batch Model Evaluation");

    let model = setup::build_model(&args.model)?;
    output::print_info(&format!("Dispersion grid: {} points", model.grid_size_1d()));

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} data files", files.len()));

    fs::create_dir_all(&args.output).map_err(|e| SansError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(files, |file| {
        process_file(file, &args.output, args.overwrite, &model)
    })?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} files, {} success, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    for msg in result.skips.iter().take(10) {
        output::print_skip(msg);
    }

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 输出文件路径
fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("data");
    output_dir.join(format!("{}_model.csv", stem))
}

/// 处理单个数据文件
fn process_file(
    input: &PathBuf,
    output_dir: &Path,
    overwrite: bool,
    model: &EllipticalCylinderModel,
) -> ProcessResult {
    let output_file = output_path(input, output_dir);

    if output_file.exists() && !overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    match evaluate_file(input, &output_file, model) {
        Ok(n) => ProcessResult::Success(format!(
            "{} -> {} ({} points)",
            input.display(),
            output_file.display(),
            n
        )),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

/// 在数据文件的 q 点上求值并写出 CSV，返回点数
fn evaluate_file(input: &Path, output: &Path, model: &EllipticalCylinderModel) -> Result<usize> {
    let data = parsers::parse_column_file(input)?;
    if data.rows.is_empty() {
        return Err(SansError::ParseError {
            format: "column data".to_string(),
            path: input.display().to_string(),
            reason: "no data rows".to_string(),
        });
    }

    write_model_csv(&data, output, |q| model.evaluate_1d(q))?;
    Ok(data.rows.len())
}

/// 写出 q, [data,] model 列
fn write_model_csv<F: Fn(f64) -> f64>(data: &ColumnData, output: &Path, model: F) -> Result<()> {
    let with_data = data.min_columns() >= 2;
    let mut wtr = csv::Writer::from_path(output)?;

    if with_data {
        wtr.write_record(["q", "data", "model"])?;
    } else {
        wtr.write_record(["q", "model"])?;
    }

    for row in &data.rows {
        let q = row[0];
        let value = format!("{:.6e}", model(q));
        if with_data {
            wtr.write_record(&[format!("{:.6e}", q), format!("{:.6e}", row[1]), value])?;
        } else {
            wtr.write_record(&[format!("{:.6e}", q), value])?;
        }
    }

    wtr.flush().map_err(|e| SansError::FileWriteError {
        path: output.display().to_string(),
        source: e,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sansmodel_batch_{}_{}", tag, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("data/run1.dat"), Path::new("out")),
            PathBuf::from("out/run1_model.csv")
        );
    }

    #[test]
    fn test_write_model_csv_with_data_column() {
        let dir = temp_dir("csv");
        let data = ColumnData {
            name: "run".to_string(),
            rows: vec![vec![0.1, 5.0, 0.2], vec![0.2, 2.0, 0.1]],
        };
        let path = dir.join("run_model.csv");
        write_model_csv(&data, &path, |q| 10.0 * q).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "q,data,model");
        assert_eq!(lines[1], "1.000000e-1,5.000000e0,1.000000e0");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_process_file_skips_existing_output() {
        let dir = temp_dir("skip");
        let input = dir.join("sample.dat");
        fs::write(&input, "0.01\n0.02\n").unwrap();
        fs::write(dir.join("sample_model.csv"), "old").unwrap();

        let model = EllipticalCylinderModel::new();
        let result = process_file(&input, &dir, false, &model);
        assert!(matches!(result, ProcessResult::Skipped(_)));

        let result = process_file(&input, &dir, true, &model);
        assert!(matches!(result, ProcessResult::Success(_)));
        let text = fs::read_to_string(dir.join("sample_model.csv")).unwrap();
        assert!(text.starts_with("q,model\n"));
        assert_eq!(text.lines().count(), 3);

        fs::remove_dir_all(&dir).ok();
    }
}
