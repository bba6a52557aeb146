//! # 椭圆柱形状因子核函数
//!
//! 单个椭圆截面柱体的散射强度，作为多分散平均的被积函数。
//!
//! ## 公式
//! 1D（取向平均，μ = cos α）:
//! ```text
//! I(q) = scale·Δρ²·V·1e8 · ∫₀¹ dμ sinc²(qLμ/2) · (1/π)∫₀^π dψ [2J1(x)/x]² + bkg
//! x = q·√(1-μ²)·r·√((1+ν²)/2 + (1-ν²)·cos ψ/2),  V = π·r²·ν·L
//! ```
//! 2D（固定取向，轴向由 θ, φ 给出，截面长轴方向由 ψ 给出）:
//! ```text
//! I(qx, qy) = scale·Δρ²·V·1e8 · [2J1(q·sin α·r_eff)/(q·sin α·r_eff) · sinc(qL·cos α/2)]² + bkg
//! r_eff = √(r_major²·cos²ν + r_minor²·sin²ν)
//! ```
//! 角度单位为弧度，长度单位为 Å，Δρ 单位为 Å⁻²，结果单位为 cm⁻¹。
//!
//! ## 依赖关系
//! - 被 `models/elliptical_cylinder.rs` 调用
//! - 使用 `sans/special.rs` 和 `sans/quadrature.rs`

use crate::sans::quadrature::GaussLegendre;
use crate::sans::special::{bessel_amplitude, sinc};

use std::f64::consts::PI;

/// Å⁻¹ → cm⁻¹ 单位换算
const TO_INVERSE_CM: f64 = 1.0e8;

/// 默认取向积分的 Gauss 点数
pub const DEFAULT_GAUSS_POINTS: usize = 20;

/// 2D 核函数所需的完整参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalCylinderParameters {
    pub scale: f64,
    pub r_minor: f64,
    pub r_ratio: f64,
    pub length: f64,
    pub contrast: f64,
    pub background: f64,
    pub cyl_theta: f64,
    pub cyl_phi: f64,
    pub cyl_psi: f64,
}

impl EllipticalCylinderParameters {
    /// 柱体体积 π·r_minor·r_major·L
    pub fn volume(&self) -> f64 {
        PI * self.r_minor * self.r_minor * self.r_ratio * self.length
    }
}

/// 散射核函数接口
///
/// 1D 与 2D 使用两种不同的参数形式：1D 为扁平数组
/// `[scale, r_minor, r_ratio, length, contrast, background]`，2D 为完整结构体。
pub trait ScatteringKernel {
    fn kernel_1d(&self, dp: &[f64; 6], q: f64) -> f64;

    fn kernel_2d(&self, pars: &EllipticalCylinderParameters, qx: f64, qy: f64) -> f64;
}

/// 解析核函数
#[derive(Debug, Clone)]
pub struct AnalyticKernel {
    rule: GaussLegendre,
}

impl AnalyticKernel {
    /// 指定取向积分的 Gauss 点数
    pub fn new(gauss_points: usize) -> Self {
        Self {
            rule: GaussLegendre::new(gauss_points),
        }
    }

    pub fn gauss_points(&self) -> usize {
        self.rule.order()
    }
}

impl Default for AnalyticKernel {
    fn default() -> Self {
        Self::new(DEFAULT_GAUSS_POINTS)
    }
}

impl ScatteringKernel for AnalyticKernel {
    fn kernel_1d(&self, dp: &[f64; 6], q: f64) -> f64 {
        let [scale, r_minor, r_ratio, length, contrast, background] = *dp;
        let nu2 = r_ratio * r_ratio;

        let orientation = self.rule.integrate(0.0, 1.0, |mu| {
            let q_perp = q * (1.0 - mu * mu).sqrt();
            // 椭圆截面对方位角 ψ 的平均
            let section = self.rule.integrate(0.0, PI, |psi| {
                let x = q_perp * r_minor * ((1.0 + nu2) / 2.0 + (1.0 - nu2) * psi.cos() / 2.0).sqrt();
                bessel_amplitude(x).powi(2)
            }) / PI;
            section * sinc(q * length * mu / 2.0).powi(2)
        });

        let volume = PI * r_minor * r_minor * r_ratio * length;
        scale * contrast * contrast * volume * TO_INVERSE_CM * orientation + background
    }

    fn kernel_2d(&self, pars: &EllipticalCylinderParameters, qx: f64, qy: f64) -> f64 {
        let prefactor = pars.scale * pars.contrast * pars.contrast * pars.volume() * TO_INVERSE_CM;

        let q = qx.hypot(qy);
        if q == 0.0 {
            return prefactor + pars.background;
        }
        let (ux, uy) = (qx / q, qy / q);

        // 柱轴与 q 的夹角 α
        // q 位于探测器平面 (qz = 0)，轴的 z 分量不参与
        let sin_theta = pars.cyl_theta.sin();
        let cos_alpha =
            (sin_theta * pars.cyl_phi.cos() * ux + sin_theta * pars.cyl_phi.sin() * uy).clamp(-1.0, 1.0);
        let sin_alpha = (1.0 - cos_alpha * cos_alpha).sqrt();

        // 截面长轴与 q 的夹角 ν（探测器平面内）
        let cos_nu = (pars.cyl_psi.cos() * ux + pars.cyl_psi.sin() * uy).clamp(-1.0, 1.0);
        let sin_nu2 = 1.0 - cos_nu * cos_nu;

        let r_major = pars.r_ratio * pars.r_minor;
        let r_eff = (r_major * r_major * cos_nu * cos_nu + pars.r_minor * pars.r_minor * sin_nu2).sqrt();

        let amplitude =
            bessel_amplitude(q * sin_alpha * r_eff) * sinc(q * pars.length * cos_alpha / 2.0);

        prefactor * amplitude * amplitude + pars.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sans::special::bessel_j1;

    fn default_pars() -> EllipticalCylinderParameters {
        EllipticalCylinderParameters {
            scale: 1.0,
            r_minor: 20.0,
            r_ratio: 1.5,
            length: 400.0,
            contrast: 3.0e-6,
            background: 0.0,
            cyl_theta: 1.57,
            cyl_phi: 0.0,
            cyl_psi: 0.0,
        }
    }

    fn relative_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * a.abs().max(b.abs())
    }

    #[test]
    fn test_forward_scattering_limit() {
        let kernel = AnalyticKernel::default();
        let pars = default_pars();
        let expected = 1.0 * 9.0e-12 * pars.volume() * 1.0e8;

        let i0 = kernel.kernel_1d(&[1.0, 20.0, 1.5, 400.0, 3.0e-6, 0.0], 0.0);
        assert!(relative_eq(i0, expected, 1e-12));

        let i0_2d = kernel.kernel_2d(&pars, 0.0, 0.0);
        assert!(relative_eq(i0_2d, expected, 1e-12));
    }

    #[test]
    fn test_1d_decreases_from_forward_value() {
        let kernel = AnalyticKernel::default();
        let dp = [1.0, 20.0, 1.5, 400.0, 3.0e-6, 0.0];
        let i0 = kernel.kernel_1d(&dp, 0.0);
        let i1 = kernel.kernel_1d(&dp, 0.001);
        let i2 = kernel.kernel_1d(&dp, 0.01);
        assert!(i0 > i1 && i1 > i2 && i2 > 0.0);
    }

    #[test]
    fn test_1d_background_slot_is_additive() {
        let kernel = AnalyticKernel::default();
        let a = kernel.kernel_1d(&[1.0, 20.0, 1.5, 400.0, 3.0e-6, 0.0], 0.05);
        let b = kernel.kernel_1d(&[1.0, 20.0, 1.5, 400.0, 3.0e-6, 0.25], 0.05);
        assert!((b - a - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_2d_perpendicular_axis_reduces_to_cross_section() {
        let kernel = AnalyticKernel::default();
        // 柱轴沿 y，q 沿 x，长轴沿 x
        let pars = EllipticalCylinderParameters {
            cyl_theta: PI / 2.0,
            cyl_phi: PI / 2.0,
            cyl_psi: 0.0,
            ..default_pars()
        };
        let q = 0.05;
        let x = q * pars.r_ratio * pars.r_minor;
        let amp = 2.0 * bessel_j1(x) / x;
        let expected = 9.0e-12 * pars.volume() * 1.0e8 * amp * amp;

        let value = kernel.kernel_2d(&pars, q, 0.0);
        assert!(relative_eq(value, expected, 1e-9));
    }

    #[test]
    fn test_2d_centrosymmetric() {
        let kernel = AnalyticKernel::default();
        let pars = EllipticalCylinderParameters {
            cyl_theta: 0.7,
            cyl_phi: 0.3,
            cyl_psi: 0.2,
            ..default_pars()
        };
        let a = kernel.kernel_2d(&pars, 0.012, -0.031);
        let b = kernel.kernel_2d(&pars, -0.012, 0.031);
        assert!(relative_eq(a, b, 1e-12));
    }

    #[test]
    fn test_circular_cross_section_ignores_psi() {
        let kernel = AnalyticKernel::new(32);
        assert_eq!(kernel.gauss_points(), 32);
        let base = EllipticalCylinderParameters {
            r_ratio: 1.0,
            cyl_theta: 1.0,
            ..default_pars()
        };
        let a = kernel.kernel_2d(&EllipticalCylinderParameters { cyl_psi: 0.0, ..base }, 0.02, 0.01);
        let b = kernel.kernel_2d(&EllipticalCylinderParameters { cyl_psi: 1.2, ..base }, 0.02, 0.01);
        assert!(relative_eq(a, b, 1e-12));
    }
}
