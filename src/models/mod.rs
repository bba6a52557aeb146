//! # 数据模型模块
//!
//! 定义模型参数、参数分布以及椭圆柱散射模型。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `parsers/` 使用
//! - 子模块: parameter, dispersion, elliptical_cylinder

pub mod dispersion;
pub mod elliptical_cylinder;
pub mod parameter;

pub use dispersion::{Dispersion, DispersionKind, WeightPoint};
pub use elliptical_cylinder::EllipticalCylinderModel;
