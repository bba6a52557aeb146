//! # 参数文件解析器
//!
//! 从 CSV 读取模型参数及其分布设置。
//!
//! ## 格式说明
//! ```text
//! name,value,dispersion,width,npts,nsigmas
//! r_minor,20,gaussian,2.0,35,3
//! length,400
//! background,0.001
//! ```
//! 除 `name` 外各列均可省略或留空。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `csv` + `serde` 反序列化
//! - 使用 `models/` 设置参数

use crate::error::{Result, SansError};
use crate::models::dispersion::{DEFAULT_NPTS, DEFAULT_NSIGMAS};
use crate::models::{Dispersion, DispersionKind, EllipticalCylinderModel};
use crate::sans::ScatteringKernel;

use serde::Deserialize;
use std::path::Path;

/// 参数文件中的一行
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParamRow {
    pub name: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub dispersion: Option<DispersionKind>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub npts: Option<usize>,
    #[serde(default)]
    pub nsigmas: Option<f64>,
}

impl ParamRow {
    /// 行内的分布设置
    pub fn to_dispersion(&self) -> Result<Option<Dispersion>> {
        self.dispersion
            .map(|kind| {
                Dispersion::new_parametric(
                    kind,
                    self.width.unwrap_or(0.0),
                    self.npts.unwrap_or(DEFAULT_NPTS),
                    self.nsigmas.unwrap_or(DEFAULT_NSIGMAS),
                )
            })
            .transpose()
    }
}

/// 读取参数文件
pub fn read_param_file(path: &Path) -> Result<Vec<ParamRow>> {
    if !path.is_file() {
        return Err(SansError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .flexible(true)
        .from_path(path)?;

    let rows = rdr
        .deserialize()
        .collect::<std::result::Result<Vec<ParamRow>, _>>()?;

    Ok(rows)
}

/// 把参数行应用到模型
pub fn apply_rows<K: ScatteringKernel>(
    rows: &[ParamRow],
    model: &mut EllipticalCylinderModel<K>,
) -> Result<()> {
    for row in rows {
        if let Some(value) = row.value {
            model.set_param(&row.name, value)?;
        }
        if let Some(dispersion) = row.to_dispersion()? {
            model.set_dispersion(&row.name, dispersion)?;
        }
    }
    Ok(())
}
