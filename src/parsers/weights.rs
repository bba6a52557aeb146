//! # 分布点列文件解析器
//!
//! 读取用户给定的 (value, weight) 点列，用于 array 分布。
//!
//! ## 格式说明
//! - `.csv`: 带表头 `value,weight` 的 CSV，按列名反序列化
//! - 其他扩展名: 两列数值文本，格式同 `parsers/qdata.rs`
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `csv` + `serde` 读取 CSV
//! - 使用 `models/dispersion.rs` 的 WeightPoint

use crate::error::{Result, SansError};
use crate::models::WeightPoint;
use crate::parsers::qdata;

use std::path::Path;

/// 读取点列文件
pub fn parse_weights_file(path: &Path) -> Result<Vec<WeightPoint>> {
    if !path.is_file() {
        return Err(SansError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let points = if is_csv {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_path(path)?;
        rdr.deserialize().collect::<std::result::Result<Vec<WeightPoint>, _>>()?
    } else {
        let data = qdata::parse_column_file(path)?;
        if data.min_columns() < 2 {
            return Err(SansError::ParseError {
                format: "weights".to_string(),
                path: path.display().to_string(),
                reason: "expected two columns: value weight".to_string(),
            });
        }
        data.rows
            .iter()
            .map(|r| WeightPoint::new(r[0], r[1]))
            .collect()
    };

    if let Some(bad) = points.iter().find(|p| p.weight < 0.0) {
        return Err(SansError::ParseError {
            format: "weights".to_string(),
            path: path.display().to_string(),
            reason: format!("negative weight {} at value {}", bad.weight, bad.value),
        });
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "sansmodel_weights_{}_{}",
            std::process::id(),
            name
        ));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_csv_weights() {
        let path = temp_file("w.csv", "value,weight\n18, 0.25\n20,0.5\n# skipped\n22,0.25\n");
        let points = parse_weights_file(&path).unwrap();
        assert_eq!(
            points,
            vec![
                WeightPoint::new(18.0, 0.25),
                WeightPoint::new(20.0, 0.5),
                WeightPoint::new(22.0, 0.25)
            ]
        );
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_text_weights() {
        let path = temp_file("w.txt", "# radius weight\n0.5 1\n1.0 2\n");
        let points = parse_weights_file(&path).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], WeightPoint::new(1.0, 2.0));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_negative_weight_rejected() {
        let path = temp_file("neg.txt", "1.0 -2.0\n");
        assert!(parse_weights_file(&path).is_err());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        let path = std::path::Path::new("/nonexistent/weights.csv");
        assert!(matches!(
            parse_weights_file(path),
            Err(SansError::FileNotFound { .. })
        ));
    }
}
