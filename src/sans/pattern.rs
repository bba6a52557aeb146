//! # 散射数据
//!
//! 1D 强度曲线、2D 强度图以及 q 网格生成。
//!
//! ## 依赖关系
//! - 被 `commands/` 构造
//! - 被 `sans/plot.rs` 和 `sans/export.rs` 读取

use crate::error::{Result, SansError};

/// 曲线横轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Abscissa {
    /// 散射矢量大小 q (Å⁻¹)
    #[default]
    Q,
    /// 探测器平面方位角 φ (rad)，固定 q 的极坐标扫描
    Phi,
}

impl Abscissa {
    /// 列名
    pub fn name(self) -> &'static str {
        match self {
            Abscissa::Q => "q",
            Abscissa::Phi => "phi",
        }
    }

    /// 带单位的 ASCII 列说明
    pub fn column_label(self) -> &'static str {
        match self {
            Abscissa::Q => "q (1/Angstrom)",
            Abscissa::Phi => "phi (rad)",
        }
    }

    /// 图表坐标轴标签
    pub fn axis_label(self) -> &'static str {
        match self {
            Abscissa::Q => "q (Å⁻¹)",
            Abscissa::Phi => "φ (rad)",
        }
    }
}

/// 1D 散射曲线 I(q) 或 I(φ)
#[derive(Debug, Clone)]
pub struct IqCurve {
    /// 曲线名称
    pub name: String,
    /// 横轴含义
    pub abscissa: Abscissa,
    /// (x, I) 点列，I 单位 cm⁻¹
    pub points: Vec<(f64, f64)>,
}

/// 2D 散射强度图 I(qx, qy)
#[derive(Debug, Clone)]
pub struct IqMap {
    pub name: String,
    pub qx: Vec<f64>,
    pub qy: Vec<f64>,
    /// 行优先：qy 为行，qx 为列
    pub intensity: Vec<f64>,
}

impl IqMap {
    /// 取 (qx[i], qy[j]) 处的强度
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.intensity[j * self.qx.len() + i]
    }

    /// 按行展开为 (qx, qy, I)
    pub fn triples(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.qy.iter().enumerate().flat_map(move |(j, &qy)| {
            self.qx
                .iter()
                .enumerate()
                .map(move |(i, &qx)| (qx, qy, self.get(i, j)))
        })
    }
}

/// 生成 q 网格（线性或对数等间距）
pub fn q_grid(q_min: f64, q_max: f64, n: usize, log_spacing: bool) -> Result<Vec<f64>> {
    if n < 2 {
        return Err(SansError::InvalidRange(format!(
            "need at least 2 points, got {}",
            n
        )));
    }
    if !(q_min < q_max) {
        return Err(SansError::InvalidRange(format!(
            "{}-{} (must be min < max)",
            q_min, q_max
        )));
    }

    if log_spacing {
        if q_min <= 0.0 {
            return Err(SansError::InvalidRange(format!(
                "{}-{} (log spacing needs min > 0)",
                q_min, q_max
            )));
        }
        let (a, b) = (q_min.ln(), q_max.ln());
        let step = (b - a) / (n - 1) as f64;
        Ok((0..n).map(|i| (a + step * i as f64).exp()).collect())
    } else {
        if q_min < 0.0 {
            return Err(SansError::InvalidRange(format!(
                "{}-{} (q must be >= 0)",
                q_min, q_max
            )));
        }
        let step = (q_max - q_min) / (n - 1) as f64;
        Ok((0..n).map(|i| q_min + step * i as f64).collect())
    }
}

/// 对称的 qx/qy 轴：[-q_max, q_max] 上 n 个点
pub fn symmetric_axis(q_max: f64, n: usize) -> Result<Vec<f64>> {
    if q_max <= 0.0 {
        return Err(SansError::InvalidRange(format!(
            "q_max = {} (must be > 0)",
            q_max
        )));
    }
    if n < 2 {
        return Err(SansError::InvalidRange(format!(
            "need at least 2 points, got {}",
            n
        )));
    }
    let step = 2.0 * q_max / (n - 1) as f64;
    Ok((0..n).map(|i| -q_max + step * i as f64).collect())
}

/// 解析 "min-max" 形式的 q 范围
pub fn parse_range(range: &str) -> Result<(f64, f64)> {
    let (min, max) = range
        .split_once(':')
        .or_else(|| range.split_once('-'))
        .ok_or_else(|| SansError::InvalidRange(range.to_string()))?;

    let min: f64 = min
        .trim()
        .parse()
        .map_err(|_| SansError::InvalidRange(range.to_string()))?;
    let max: f64 = max
        .trim()
        .parse()
        .map_err(|_| SansError::InvalidRange(range.to_string()))?;

    if min < 0.0 || max <= min {
        return Err(SansError::InvalidRange(format!(
            "{} (must be 0 <= min < max)",
            range
        )));
    }

    Ok((min, max))
}
