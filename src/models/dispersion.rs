//! # 参数分布（多分散）
//!
//! 为可分散参数生成有序的 (value, weight) 求积点。
//!
//! ## 分布类型
//! - `gaussian`: exp(-(x-m)²/(2w²))
//! - `rectangle`: 在 m ± w 内均匀
//! - `lognormal`: s = w/m，exp(-(ln(x/m))²/(2s²))/x
//! - `schulz`: z = (m/w)² - 1，exp(z·ln(x/m) - (z+1)·x/m)
//! - `array`: 用户直接给出的点列
//!
//! w 是绝对标准差（与参数同单位）。权重不必归一化，求值时统一除以权重和。
//!
//! ## 依赖关系
//! - 被 `models/parameter.rs` 使用
//! - 被 `sans/quadrature.rs` 使用（WeightPoint）
//! - 使用 `regex` 解析命令行写法 `kind(width[,npts[,nsigmas]])`

use crate::error::{Result, SansError};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// 默认分布点数
pub const DEFAULT_NPTS: usize = 35;

/// 默认覆盖的标准差倍数
pub const DEFAULT_NSIGMAS: f64 = 3.0;

static SPEC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z_-]+)\s*\(([^)]*)\)\s*$").unwrap());

/// 一个求积点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightPoint {
    pub value: f64,
    pub weight: f64,
}

impl WeightPoint {
    pub fn new(value: f64, weight: f64) -> Self {
        Self { value, weight }
    }
}

/// 参数化分布类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispersionKind {
    Gaussian,
    Rectangle,
    #[serde(alias = "log-normal")]
    LogNormal,
    Schulz,
}

impl DispersionKind {
    /// 分布密度（未归一化），定义域外返回 None
    fn density(self, mean: f64, width: f64, x: f64) -> Option<f64> {
        match self {
            DispersionKind::Gaussian => {
                let d = x - mean;
                Some((-d * d / (2.0 * width * width)).exp())
            }
            DispersionKind::Rectangle => Some(1.0),
            DispersionKind::LogNormal => {
                if x <= 0.0 || mean <= 0.0 {
                    return None;
                }
                let s = width / mean;
                let l = (x / mean).ln();
                Some((-l * l / (2.0 * s * s)).exp() / x)
            }
            DispersionKind::Schulz => {
                if x <= 0.0 || mean <= 0.0 {
                    return None;
                }
                let z = (mean / width).powi(2) - 1.0;
                Some((z * (x / mean).ln() - (z + 1.0) * x / mean).exp())
            }
        }
    }
}

impl fmt::Display for DispersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispersionKind::Gaussian => write!(f, "gaussian"),
            DispersionKind::Rectangle => write!(f, "rectangle"),
            DispersionKind::LogNormal => write!(f, "lognormal"),
            DispersionKind::Schulz => write!(f, "schulz"),
        }
    }
}

impl FromStr for DispersionKind {
    type Err = SansError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gaussian" | "gauss" => Ok(DispersionKind::Gaussian),
            "rectangle" | "rect" => Ok(DispersionKind::Rectangle),
            "lognormal" | "log-normal" => Ok(DispersionKind::LogNormal),
            "schulz" => Ok(DispersionKind::Schulz),
            other => Err(SansError::InvalidDispersion(format!(
                "unknown distribution '{}' (use gaussian, rectangle, lognormal, schulz)",
                other
            ))),
        }
    }
}

/// 参数分布
#[derive(Debug, Clone, PartialEq)]
pub enum Dispersion {
    /// 参数化分布
    Parametric {
        kind: DispersionKind,
        width: f64,
        npts: usize,
        nsigmas: f64,
    },
    /// 用户给定的点列
    Array(Vec<WeightPoint>),
}

impl Dispersion {
    /// 使用默认点数和 sigma 倍数创建参数化分布
    pub fn parametric(kind: DispersionKind, width: f64) -> Self {
        Dispersion::Parametric {
            kind,
            width,
            npts: DEFAULT_NPTS,
            nsigmas: DEFAULT_NSIGMAS,
        }
    }

    /// 创建参数化分布，要求 width >= 0 且 nsigmas > 0（均为有限值）
    pub fn new_parametric(
        kind: DispersionKind,
        width: f64,
        npts: usize,
        nsigmas: f64,
    ) -> Result<Self> {
        if !width.is_finite() || width < 0.0 {
            return Err(SansError::InvalidDispersion(format!(
                "{} width must be >= 0, got {}",
                kind, width
            )));
        }
        if !nsigmas.is_finite() || nsigmas <= 0.0 {
            return Err(SansError::InvalidDispersion(format!(
                "{} nsigmas must be > 0, got {}",
                kind, nsigmas
            )));
        }
        Ok(Dispersion::Parametric {
            kind,
            width,
            npts,
            nsigmas,
        })
    }

    /// 解析 `kind(width[,npts[,nsigmas]])`
    pub fn from_spec(spec: &str) -> Result<Self> {
        let caps = SPEC_PATTERN.captures(spec).ok_or_else(|| {
            SansError::InvalidDispersion(format!(
                "'{}' (expected kind(width[,npts[,nsigmas]]))",
                spec
            ))
        })?;

        let kind: DispersionKind = caps[1].parse()?;
        let args: Vec<&str> = caps[2]
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if args.is_empty() || args.len() > 3 {
            return Err(SansError::InvalidDispersion(format!(
                "'{}' takes 1 to 3 arguments",
                spec
            )));
        }

        let bad = |what: &str| SansError::InvalidDispersion(format!("'{}': bad {}", spec, what));

        let width: f64 = args[0].parse().map_err(|_| bad("width"))?;
        let npts: usize = match args.get(1) {
            Some(s) => s.parse().map_err(|_| bad("npts"))?,
            None => DEFAULT_NPTS,
        };
        let nsigmas: f64 = match args.get(2) {
            Some(s) => s.parse().map_err(|_| bad("nsigmas"))?,
            None => DEFAULT_NSIGMAS,
        };

        Dispersion::new_parametric(kind, width, npts, nsigmas).map_err(|e| match e {
            SansError::InvalidDispersion(msg) => {
                SansError::InvalidDispersion(format!("'{}': {}", spec, msg))
            }
            other => other,
        })
    }

    /// 生成求积点
    ///
    /// 取值不大于 min 的点被丢弃（下界不可取到）；无分散时退化为 (nominal, 1.0)。
    pub fn weights(&self, nominal: f64, min: Option<f64>) -> Vec<WeightPoint> {
        let in_bounds = |x: f64| min.map_or(true, |lo| x > lo);

        match self {
            Dispersion::Parametric {
                kind,
                width,
                npts,
                nsigmas,
            } => {
                if *npts < 2 || *width == 0.0 {
                    return vec![WeightPoint::new(nominal, 1.0)];
                }

                let half_span = match kind {
                    DispersionKind::Rectangle => *width,
                    _ => nsigmas * width,
                };
                let lo = nominal - half_span;
                let step = 2.0 * half_span / (*npts - 1) as f64;

                (0..*npts)
                    .map(|i| lo + step * i as f64)
                    .filter(|&x| in_bounds(x))
                    .filter_map(|x| {
                        kind.density(nominal, *width, x)
                            .map(|w| WeightPoint::new(x, w))
                    })
                    .collect()
            }
            Dispersion::Array(points) => points
                .iter()
                .filter(|p| in_bounds(p.value))
                .copied()
                .collect(),
        }
    }

    /// 简短描述，用于参数表
    pub fn describe(&self) -> String {
        match self {
            Dispersion::Parametric {
                kind,
                width,
                npts,
                nsigmas,
            } => format!("{}(w={}, n={}, {}σ)", kind, width, npts, nsigmas),
            Dispersion::Array(points) => format!("array({} pts)", points.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spec() {
        let d = Dispersion::from_spec("gaussian(2.0, 11, 2)").unwrap();
        assert_eq!(
            d,
            Dispersion::Parametric {
                kind: DispersionKind::Gaussian,
                width: 2.0,
                npts: 11,
                nsigmas: 2.0
            }
        );

        let d = Dispersion::from_spec("schulz(0.5)").unwrap();
        assert_eq!(d, Dispersion::parametric(DispersionKind::Schulz, 0.5));

        assert!(Dispersion::from_spec("gaussian").is_err());
        assert!(Dispersion::from_spec("cauchy(1.0)").is_err());
        assert!(Dispersion::from_spec("gaussian(a)").is_err());
        assert!(Dispersion::from_spec("gaussian(1,2,3,4)").is_err());
        assert!(Dispersion::from_spec("gaussian(-1)").is_err());
        assert!(Dispersion::from_spec("gaussian(1, 5, 0)").is_err());
    }

    #[test]
    fn test_new_parametric_validates_width_and_nsigmas() {
        let d = Dispersion::new_parametric(DispersionKind::Gaussian, 0.0, 5, 3.0).unwrap();
        assert_eq!(d.weights(20.0, None).len(), 1);

        for (width, nsigmas) in [(-0.1, 3.0), (f64::NAN, 3.0), (1.0, 0.0), (1.0, -2.0), (1.0, f64::NAN)] {
            assert!(matches!(
                Dispersion::new_parametric(DispersionKind::Gaussian, width, 5, nsigmas),
                Err(SansError::InvalidDispersion(_))
            ));
        }
    }

    #[test]
    fn test_zero_width_is_single_point() {
        let d = Dispersion::parametric(DispersionKind::Gaussian, 0.0);
        assert_eq!(d.weights(20.0, Some(0.0)), vec![WeightPoint::new(20.0, 1.0)]);

        let d = Dispersion::from_spec("gaussian(2.0, 1)").unwrap();
        assert_eq!(d.weights(20.0, None).len(), 1);
    }

    #[test]
    fn test_gaussian_points_are_symmetric() {
        let d = Dispersion::from_spec("gaussian(2.0, 5, 2)").unwrap();
        let w = d.weights(20.0, Some(0.0));
        let values: Vec<f64> = w.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![16.0, 18.0, 20.0, 22.0, 24.0]);
        assert_eq!(w[2].weight, 1.0);
        assert!((w[0].weight - w[4].weight).abs() < 1e-15);
        assert!((w[1].weight - (-0.5_f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_minimum_is_exclusive() {
        let d = Dispersion::from_spec("rectangle(10.0, 3)").unwrap();
        let w = d.weights(10.0, Some(0.0));
        // 0.0 被丢弃
        assert_eq!(w, vec![WeightPoint::new(10.0, 1.0), WeightPoint::new(20.0, 1.0)]);
    }

    #[test]
    fn test_lognormal_and_schulz_skip_non_positive() {
        for kind in [DispersionKind::LogNormal, DispersionKind::Schulz] {
            let d = Dispersion::Parametric {
                kind,
                width: 5.0,
                npts: 9,
                nsigmas: 4.0,
            };
            let w = d.weights(10.0, None);
            assert!(w.iter().all(|p| p.value > 0.0 && p.weight > 0.0));
            assert!(w.len() < 9);
        }
    }

    #[test]
    fn test_array_dispersion_filters_minimum() {
        let d = Dispersion::Array(vec![
            WeightPoint::new(-1.0, 1.0),
            WeightPoint::new(5.0, 2.0),
        ]);
        assert_eq!(d.weights(0.0, Some(0.0)), vec![WeightPoint::new(5.0, 2.0)]);
    }
}
