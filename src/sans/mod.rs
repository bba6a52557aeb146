//! # SANS 计算模块
//!
//! 小角中子散射强度计算。
//!
//! ## 子模块
//! - `special`: Bessel 函数等特殊函数
//! - `quadrature`: 加权网格归约与 Gauss-Legendre 求积
//! - `kernel`: 椭圆柱形状因子核函数
//! - `pattern`: 1D 曲线、2D 强度图与 q 网格
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `models/elliptical_cylinder.rs` 和 `commands/` 使用

pub mod export;
pub mod kernel;
pub mod pattern;
pub mod plot;
pub mod quadrature;
pub mod special;

pub use kernel::{AnalyticKernel, ScatteringKernel};
pub use pattern::{IqCurve, IqMap};
