//! # 模型参数
//!
//! 带可选下界和可选分布的标量参数。
//!
//! 边界只在配置阶段检查（`set`），求值阶段不再检查；分布点的过滤
//! 见 `Dispersion::weights`。
//!
//! ## 依赖关系
//! - 被 `models/elliptical_cylinder.rs` 使用
//! - 使用 `models/dispersion.rs`

use crate::error::{Result, SansError};
use crate::models::dispersion::{Dispersion, WeightPoint};

/// 标量模型参数
#[derive(Debug, Clone)]
pub struct Parameter {
    /// 参数名
    pub name: &'static str,
    /// 单位（显示用）
    pub unit: &'static str,
    value: f64,
    min: Option<f64>,
    dispersible: bool,
    dispersion: Option<Dispersion>,
}

impl Parameter {
    /// 创建不可分散的参数
    pub fn new(name: &'static str, unit: &'static str, value: f64) -> Self {
        Self {
            name,
            unit,
            value,
            min: None,
            dispersible: false,
            dispersion: None,
        }
    }

    /// 创建可分散的参数
    pub fn dispersible(name: &'static str, unit: &'static str, value: f64) -> Self {
        Self {
            dispersible: true,
            ..Self::new(name, unit, value)
        }
    }

    /// 设置下界
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// 当前值
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn is_dispersible(&self) -> bool {
        self.dispersible
    }

    pub fn dispersion(&self) -> Option<&Dispersion> {
        self.dispersion.as_ref()
    }

    /// 设置参数值（检查下界）
    pub fn set(&mut self, value: f64) -> Result<()> {
        if let Some(min) = self.min {
            if value < min {
                return Err(SansError::BelowMinimum {
                    name: self.name.to_string(),
                    value,
                    min,
                });
            }
        }
        self.value = value;
        Ok(())
    }

    /// 设置分布
    pub fn set_dispersion(&mut self, dispersion: Dispersion) -> Result<()> {
        if !self.dispersible {
            return Err(SansError::NotDispersible(self.name.to_string()));
        }
        self.dispersion = Some(dispersion);
        Ok(())
    }

    /// 求积点；未设置分布时为 [(value, 1.0)]
    pub fn get_weights(&self) -> Vec<WeightPoint> {
        match &self.dispersion {
            Some(d) => d.weights(self.value, self.min),
            None => vec![WeightPoint::new(self.value, 1.0)],
        }
    }

    /// 检查分布非空且总权重为正
    pub fn validate(&self) -> Result<()> {
        let weights = self.get_weights();
        if weights.is_empty() {
            return Err(SansError::DegenerateDistribution {
                name: self.name.to_string(),
                reason: "no sample point lies inside the parameter bounds".to_string(),
            });
        }
        if weights.iter().any(|p| !p.weight.is_finite()) {
            return Err(SansError::DegenerateDistribution {
                name: self.name.to_string(),
                reason: "non-finite weight".to_string(),
            });
        }
        if weights.iter().any(|p| p.weight < 0.0) {
            return Err(SansError::DegenerateDistribution {
                name: self.name.to_string(),
                reason: "negative weight".to_string(),
            });
        }
        let total: f64 = weights.iter().map(|p| p.weight).sum();
        if total <= 0.0 {
            return Err(SansError::DegenerateDistribution {
                name: self.name.to_string(),
                reason: "total weight is zero".to_string(),
            });
        }
        Ok(())
    }
}
